/*!
Reshapes a spreadsheet of evaluation criteria into an impact / type / criterion
hierarchy.

The pipeline is made of small stages, each producing a new value:

1. a [`RawTable`], as decoded from the source file (done by the caller),
2. [`normalize`] renames the first four columns to the canonical schema
   ([`CANONICAL_COLUMNS`]) and returns a [`CanonicalTable`],
3. [`build`] turns the rows into [`CriterionRecord`]s, dropping the rows that
   lack an impact, a type or a criterion,
4. [`build_tree`], [`count_by_impact`], [`count_by_type`] and [`search`] prepare
   the data for display, and [`wrap`] formats the labels.

```
use criteria_tree::*;

let table = RawTable::new(
    vec!["Impact".into(), "Type".into(), "Critère".into(), "Description".into()],
    vec![
        vec![Some("A".into()), Some("T1".into()), Some("C1".into()), Some("D1".into())],
        vec![Some("A".into()), Some("T1".into()), None, Some("D2".into())],
    ],
);
let records = build(&normalize(table))?;
assert_eq!(records.len(), 1);
assert_eq!(records[0].criterion, "C1");
# Ok::<(), TreeErrors>(())
```
*/

mod aggregate;
mod config;
mod hierarchy;
mod normalize;
mod wrap;

pub use crate::aggregate::*;
pub use crate::config::*;
pub use crate::hierarchy::*;
pub use crate::normalize::*;
pub use crate::wrap::*;
