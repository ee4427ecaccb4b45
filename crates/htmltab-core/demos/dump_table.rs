use htmltab_core::TableReader;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let location = args
        .next()
        .ok_or("usage: dump_table <url-or-path> [selector] [index]")?;
    let selector = args.next();
    let index = args.next().map(|i| i.parse::<usize>()).transpose()?;

    let mut reader = TableReader::open(&location, selector.as_deref(), index)?;
    reader.refresh().await?;

    let headings = reader.headings()?;
    if headings.is_empty() {
        println!("(no header row)");
    } else {
        println!("{}", headings.join(" | "));
    }

    let mut count = 0;
    for row in reader.rows()? {
        println!("{}", row.cells().join(" | "));
        count += 1;
    }

    println!("\n{} row(s) from {}", count, reader.source());
    Ok(())
}
