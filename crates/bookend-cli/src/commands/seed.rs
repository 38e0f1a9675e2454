//! Demo data seeding command.

use anyhow::Result;

use bookend_client::{RecordStore, demo};

pub async fn cmd_seed(store: &dyn RecordStore, quiet: bool) -> Result<()> {
    let summary = demo::generate_demo_data(store).await?;
    if !quiet {
        println!("{}", summary.message);
        println!("Demo accounts use the password 'password123'.");
    }
    Ok(())
}
