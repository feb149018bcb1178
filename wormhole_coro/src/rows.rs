// rows.rs - One generation computed as a coroutine per row

use std::sync::Arc;

use wormhole::{Grid, PortalNetworks, next_row};

/// Row coroutine: computes one row of the next generation, then yields.
async fn process_row(row_index: usize, grid: Arc<Grid>, portals: Arc<PortalNetworks>) -> (usize, Vec<bool>) {
    let row = next_row(&grid, &portals, row_index);
    tokio::task::yield_now().await;  // Cooperative yielding
    (row_index, row)
}

/// Spawns every row at once and assembles the finished rows in order.
pub async fn next_generation(grid: Arc<Grid>, portals: Arc<PortalNetworks>) -> anyhow::Result<Grid> {
    if grid.rows() == 0 {
        return Ok((*grid).clone());
    }

    let mut handles = Vec::with_capacity(grid.rows());
    for row in 0..grid.rows() {
        handles.push(tokio::spawn(process_row(row, Arc::clone(&grid), Arc::clone(&portals))));
    }

    let mut rows = vec![Vec::new(); grid.rows()];
    for handle in handles {
        let (row_index, completed_row) = handle.await?;
        rows[row_index] = completed_row;
    }
    Ok(Grid::from_rows(&rows)?)
}
