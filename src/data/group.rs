use crate::error::Result;

use super::model::{records, CircleDescriptor, NumericTable};

/// Circle data of one example, split column-wise.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupData {
    pub centers_real: Vec<f64>,
    pub centers_imag: Vec<f64>,
    pub radii: Vec<f64>,
}

impl GroupData {
    pub fn len(&self) -> usize {
        self.radii.len()
    }

    pub fn is_empty(&self) -> bool {
        self.radii.is_empty()
    }

    /// The circles again as records, in table order.
    pub fn circles(&self) -> impl Iterator<Item = CircleDescriptor> + '_ {
        self.centers_real
            .iter()
            .zip(&self.centers_imag)
            .zip(&self.radii)
            .map(|((&center_real, &center_imag), &radius)| CircleDescriptor {
                center_real,
                center_imag,
                radius,
            })
    }
}

/// Split the group table into centre and radius columns, keeping row order.
/// Only field presence is checked.
pub fn parse_group_data(table: &NumericTable) -> Result<GroupData> {
    let circles: Vec<CircleDescriptor> = records(table)?;
    let mut group = GroupData::default();
    for c in circles {
        group.centers_real.push(c.center_real);
        group.centers_imag.push(c.center_imag);
        group.radii.push(c.radius);
    }
    Ok(group)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::KpDataError;

    fn group_table(rows: Vec<Vec<f64>>) -> NumericTable {
        NumericTable::new(
            vec!["centerReal".into(), "centerImag".into(), "radius".into()],
            rows,
        )
    }

    #[test]
    fn splits_columns_in_row_order() {
        let table = group_table(vec![vec![1.0, 0.0, 2.0], vec![-1.0, 0.5, 1.5]]);
        let group = parse_group_data(&table).unwrap();
        assert_eq!(group.centers_real, vec![1.0, -1.0]);
        assert_eq!(group.centers_imag, vec![0.0, 0.5]);
        assert_eq!(group.radii, vec![2.0, 1.5]);

        let circles: Vec<CircleDescriptor> = group.circles().collect();
        assert_eq!(
            circles[1],
            CircleDescriptor { center_real: -1.0, center_imag: 0.5, radius: 1.5 }
        );
    }

    #[test]
    fn empty_table_gives_empty_group() {
        let group = parse_group_data(&group_table(Vec::new())).unwrap();
        assert!(group.is_empty());
    }

    #[test]
    fn missing_radius_column_is_reported() {
        let table = NumericTable::new(
            vec!["centerReal".into(), "centerImag".into()],
            vec![vec![1.0, 0.0]],
        );
        let err = parse_group_data(&table).unwrap_err();
        assert!(matches!(err, KpDataError::MissingField { field: "radius", .. }));
    }
}
