/*!

This is the long-form manual for `seat_tally` and `lsdash`.

## Input format

One flat table, one row per candidate and constituency. The columns below
are required; any other column is ignored. Headers are matched without
regard to case or to surrounding whitespace (`" Total Votes "` is fine).

| Column        | Content                                        |
|---------------|------------------------------------------------|
| `State`       | name of the state or union territory           |
| `PC No`       | code of the constituency within the state      |
| `PC Name`     | name of the constituency                       |
| `Sl no`       | serial number of the candidate on the ballot   |
| `Candidate`   | name of the candidate                          |
| `Party`       | party of the candidate                         |
| `Total Votes` | votes received                                 |

```text
State,PC No,PC Name,Sl no,Candidate,Party,Total Votes
Goa,1,North Goa,1,Shripad Yesso Naik,Bharatiya Janata Party,257326
Goa,1,North Goa,2,Ramakant Khalap,Indian National Congress,141311
```

A missing column stops the load. A row whose vote count is not a finite
non-negative number (`""`, `"-"`, `"-5"`, `"NaN"`) is dropped: it does not
count anywhere, not even as a zero. Fractional counts such as `"12.5"` are
kept. The serial number must be a non-negative whole number, otherwise the
row is dropped as well.

## Winners

A constituency is identified by its state and its code. Its winner is the
candidate with the most votes. Equal vote counts are settled by the
candidate name (alphabetical order), then by the serial number. A
constituency where every row was dropped has no winner.

## Views

| View                  | Reads                 | Content                                         |
|-----------------------|-----------------------|-------------------------------------------------|
| `constituencyOptions` | state                 | constituency names of the state, sorted         |
| `statePieChart`       | state                 | seats won per party                             |
| `statePartyTable`     | state                 | seats won per party, then a `Total Seats` row   |
| `seatPieChart`        | state, constituency   | votes per candidate                             |
| `candidateTable`      | state, constituency   | serial, candidate, party and votes, input order |

Parties are listed by decreasing number of seats. Parties with the same
number of seats are listed in the order of their first win, constituency
codes being compared as numbers (`2` before `10`). When nothing is selected a
chart has a placeholder title and no points, and a table has no rows.

Selecting a state keeps the selected constituency only if the new state has
a constituency of the same name. Selecting a constituency that is not part
of the current state is refused and the selection does not change.

## Command line

```bash
lsdash -i eci-2024.csv --state Kerala --constituency Wayanad
lsdash -i results.xlsx --excel-worksheet-name Results --interactive
lsdash -c dashboard.json -o views.json
```

The configuration file holds the same settings:

```json
{
  "dataSource": {"provider": "csv", "filePath": "eci-2024.csv"},
  "initialSelection": {"state": "Kerala", "constituency": "Wayanad"},
  "outputSettings": {"outputPath": "views.json"}
}
```

*/
