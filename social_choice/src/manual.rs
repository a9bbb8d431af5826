/*!

This is the long-form manual for `social_choice` and `scvote`.

## Input

The input of every rule is a table of numbers. Each row is an agent (a voter) and each
column is an alternative (a candidate). Rows and columns are numbered from 1, so the
alternative `3` is the third column of the table and the agent `2` is the second row.

|         | alternative 1 | alternative 2 | alternative 3 |
|---------|---------------|---------------|---------------|
| agent 1 | 2             | 3             | 1             |
| agent 2 | 3             | 2             | 1             |
| agent 3 | 3             | 1             | 2             |

The values are turned into rankings by sorting each row by decreasing value. The table
above gives the rankings `[2, 1, 3]`, `[1, 2, 3]` and `[1, 3, 2]`. Equal values keep
their column order: a row `[1, 3, 3]` ranks `2` before `3`.

## Rules

* `dictatorship`: the first choice of one designated agent.
* `scoring`: a generic positional rule. The score vector gives the number of points
  for the first rank, the second rank, and so on. It must have one entry per
  alternative.
* `plurality`: one point for the first choice of each agent. Alternatives that are
  never ranked first are not part of the count, so they can never win, even in a tie.
* `veto`: one point for every alternative except the last choice of each agent.
* `borda`: `m` points for the first choice, `m - 1` for the second, down to 1 point
  for the last choice, with `m` alternatives.
* `harmonic`: `1`, `1/2`, `1/3`, ... points by rank. Sums are floating point numbers
  and are compared exactly.
* `stv`: single transferable vote. Each round, the first choices are counted and all
  the alternatives with the smallest count are eliminated at the same time. If this
  would eliminate all the remaining alternatives, the election fails.
* `range`: the values of the table are summed by column. The rankings are only used
  when the tie is broken by an agent.

## Tie-breaking

When several alternatives share the best score, a tie-break policy picks one of them:

* `max` (default): the alternative with the largest number.
* `min`: the alternative with the smallest number.
* `random`: a random alternative. Pass a seed (`--seed` or `randomSeed`) to get the same
  outcome on every run.
* an agent number: the tied alternative that this agent ranks highest. The agent must
  exist, but this is only checked when a tie actually happens.

## Command line

```bash
scvote -i scores.csv --rule borda --tie-break min
scvote -i scores.xlsx --rule scoring --score-vector 5,3,0
scvote -i scores.csv --rule dictatorship --dictator 4
scvote -c election.json --out stdout
```

Input files are CSV or Excel (`.xlsx`). Use `--first-row` and `--first-column` (1-based)
to skip headers and label columns. Empty cells count as 0.

## Configuration

The election can also be described in JSON:

```json
{
  "outputSettings": { "contestName": "Board election", "outputDirectory": "out" },
  "inputSource": {
    "provider": "csv",
    "filePath": "scores.csv",
    "firstVoteRowIndex": 2,
    "firstVoteColumnIndex": 2
  },
  "rules": { "rule": "stv", "tiebreakMode": "random", "randomSeed": "42" }
}
```

Relative paths are resolved against the directory of the configuration file. Command
line flags override the values of the file.

## Output

The summary is a JSON document with one entry per round: the tally of the round and
the alternatives that were eliminated or elected. Pass `--reference` with a previously
saved summary to check that a new run gives the same result.
 */
