/*!

This is the long-form manual for `peit_scoring` and the `peit` command line program.

## Axes and type codes

The political test measures four axes, the economic test three. Each axis has a left and a right
pole, and each pole a letter. A type code is the concatenation of the winning letters, in this order:

| category  | key   | left pole                | right pole              |
|-----------|-------|--------------------------|-------------------------|
| political | `I/C` | `I` Individualism        | `C` Collectivism        |
| political | `P/T` | `P` Progressivism        | `T` Traditionalism      |
| political | `A/U` | `A` Active equality      | `U` Universal equality  |
| political | `E/S` | `E` Cooperation first    | `S` Security first      |
| economic  | `G/S` | `G` Growth               | `S` Stability           |
| economic  | `V/A` | `V` Vision investing     | `A` Data investing      |
| economic  | `E/W` | `E` Entrepreneurial      | `W` Steady worker       |

When both poles of an axis received the same number of votes, including when the axis has no answer
at all, the left pole wins. An empty session is therefore classified as `IPAE` and `GVE`.

The chart value of an axis is the share of its votes that went to the left pole, rounded to the
nearest integer with halves rounded up. An axis without answers is shown at 50.

## Input formats

### Question bank

A JSON array. `axis` is one of the keys of the table above and must belong to `category`.

```json
[
  { "id": 1, "category": "political", "axis": "I/C",
    "text": "...", "optionA": "...", "optionB": "..." }
]
```

### Mapping table

A JSON object from question id to the pole each option votes for. The economic poles that share a
letter with a political pole are written `S2`, `A2` and `E2`. Both poles of an entry must be the two
ends of one axis.

```json
{ "1": { "A": "I", "B": "C" }, "50": { "A": "E2", "B": "W" } }
```

### Stored answers

A dump of the browser storage. The keys are `political_answers`, `economic_answers` and `answers`
(the full test). Each value is the serialized answer set, as a string or as an object:

```json
{ "answers": "{\"q1\":\"A\",\"q50\":\"B\"}" }
```

Entries that are not of the form `q<id>` or whose value is not `A` or `B` are skipped with a warning.

When no test type is requested, the session is chosen as follows: a political or economic run that
is the only one stored, then the full test, then the political run, then the economic run.

### Results dictionary

A JSON object keyed by type code. The `category` field selects the kind of record; the `scores`
field is filled in with the chart values of the session.

## Configuration

Instead of passing every file on the command line, they can be listed in a configuration file.
Relative paths are resolved against the directory of the configuration file. Command line flags
take precedence.

```json
{
  "questionsPath": "questions.json",
  "mappingPath": "mapping.json",
  "answersPath": "storage.json",
  "resultsPath": "results.json",
  "testType": "both"
}
```

```bash
peit --config quiz_config.json --out report.json
```

*/
