use anyhow::Result;
use geotasks::commons::text::{clean_text, DEFAULT_KEEP_PUNCTUATION};

/// Example: clean a batch of texts before tokenization
fn main() -> Result<()> {
    let texts = [
        "Great coffee!!! ☕ 10/10 would come back :)",
        "Service was slow... #disappointed @cafe",
        "¿Abierto los domingos? Sí, hasta las 14:00.",
    ];

    let cleaned = clean_text(&texts, DEFAULT_KEEP_PUNCTUATION)?;
    for (raw, clean) in texts.iter().zip(&cleaned) {
        println!("{:<48} -> {}", raw, clean);
    }

    Ok(())
}
