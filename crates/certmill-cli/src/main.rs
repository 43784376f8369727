//! certmill - throwaway development CA bootstrapper.

use anyhow::Result;

fn main() -> Result<()> {
    certmill_cli::run()
}
