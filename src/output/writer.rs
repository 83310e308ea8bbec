use crate::output::result::CrawlResult;
use crate::CrawlerError;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes the crawl result as pretty-printed JSON to `output_path`
///
/// An existing file is replaced.
pub fn write_result(result: &CrawlResult, output_path: &Path) -> Result<(), CrawlerError> {
    let mut writer = BufWriter::new(File::create(output_path)?);
    write_result_to(result, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Writes the crawl result as pretty-printed JSON followed by a newline
pub fn write_result_to<W: Write>(result: &CrawlResult, mut writer: W) -> Result<(), CrawlerError> {
    serde_json::to_writer_pretty(&mut writer, result)?;
    writeln!(writer)?;
    Ok(())
}
