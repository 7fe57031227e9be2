use cryptocharger_core::*;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TableError {
    #[error("Duplicate observation for {pair} on {exchange}")]
    Duplicate { pair: Pair, exchange: String },
}

/// Pivot observations into a pair × exchange table.
///
/// Rows and columns keep the order in which pairs and exchanges first appear.
/// A (pair, exchange) cell observed twice is an error.
pub fn pivot(observations: &[PriceObservation]) -> Result<PriceTable, TableError> {
    let mut table = PriceTable::default();

    for obs in observations {
        let row = match table.rows.iter().position(|p| *p == obs.pair) {
            Some(i) => i,
            None => {
                table.rows.push(obs.pair.clone());
                table.cells.push(vec![None; table.columns.len()]);
                table.rows.len() - 1
            }
        };
        let col = match table.columns.iter().position(|c| *c == obs.exchange) {
            Some(i) => i,
            None => {
                table.columns.push(obs.exchange.clone());
                for cells in &mut table.cells {
                    cells.push(None);
                }
                table.columns.len() - 1
            }
        };

        let cell = &mut table.cells[row][col];
        if cell.is_some() {
            return Err(TableError::Duplicate {
                pair: obs.pair.clone(),
                exchange: obs.exchange.clone(),
            });
        }
        *cell = Some(obs.price);
    }

    Ok(table)
}
