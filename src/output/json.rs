use crate::finger::HandResult;
use crate::Result;
use std::io::Write;

/// Writes the poke result as pretty printed JSON followed by a newline
pub fn render_json<W: Write>(result: &HandResult, writer: &mut W) -> Result<()> {
    let json = serde_json::to_string_pretty(result)?;
    writeln!(writer, "{}", json)?;
    Ok(())
}
