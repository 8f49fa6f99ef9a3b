use std::io::{self, Write};

pub const HEADER_PREFIX: &str = "# --- Código extraído de: ";
pub const HEADER_SUFFIX: &str = " ---";

/// Writes one provenance-marked section per notebook to the combined output.
pub struct SectionWriter<W: Write> {
    inner: W,
    sections: usize,
}

impl<W: Write> SectionWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner, sections: 0 }
    }

    /// Header line, the code, then a blank line before the next section.
    pub fn write_section(&mut self, name: &str, code: &str) -> io::Result<()> {
        writeln!(self.inner, "{HEADER_PREFIX}{name}{HEADER_SUFFIX}")?;
        write!(self.inner, "{code}\n\n")?;
        self.sections += 1;
        Ok(())
    }

    pub fn sections(&self) -> usize {
        self.sections
    }

    pub fn finish(mut self) -> io::Result<W> {
        self.inner.flush()?;
        Ok(self.inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_layout() -> io::Result<()> {
        let mut writer = SectionWriter::new(Vec::new());
        writer.write_section("a.ipynb", "x = 1\n\ny = 2")?;
        writer.write_section("b.ipynb", "print(3)")?;
        assert_eq!(writer.sections(), 2);

        let bytes = writer.finish()?;
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(
            text,
            "# --- Código extraído de: a.ipynb ---\nx = 1\n\ny = 2\n\n\
             # --- Código extraído de: b.ipynb ---\nprint(3)\n\n"
        );
        Ok(())
    }

    #[test]
    fn test_no_sections_writes_nothing() -> io::Result<()> {
        let writer = SectionWriter::new(Vec::new());
        assert_eq!(writer.sections(), 0);
        assert!(writer.finish()?.is_empty());
        Ok(())
    }
}
