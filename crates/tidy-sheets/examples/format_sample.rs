//! Example: write the demonstration workbook and run the full format on it

use tidy_sheets::prelude::*;

fn main() -> FormatterResult<()> {
    let dir = std::env::temp_dir();
    let input = dir.join("tidy_sample.xlsx");
    tidy_sheets::write_sample(&input)?;
    println!("Wrote {}", input.display());

    for op in [Operation::RemoveEmptyRows, Operation::FullFormat] {
        let report = op.run(&Request::new(&input))?;
        println!("{}", report);
    }

    Ok(())
}
