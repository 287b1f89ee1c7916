use super::code_writer::{CodeWriter, Scope};

/// C# constructs on top of [`CodeWriter`].
pub trait CSharpWriter {
    /// `namespace name { ... }`
    fn namespace(&mut self, name: &str) -> Scope;

    /// `modifiers class name { ... }`
    fn class(&mut self, name: &str, modifiers: &[&str]) -> Scope;

    /// Prefix lines with `/// ` until the scope ends.
    fn xml_doc(&mut self) -> Scope;

    /// `<summary>`, closed when the scope ends.
    fn summary(&mut self) -> Scope;

    /// Inline `<see cref="..."/>`.
    fn see(&mut self, cref: &str);
}

impl CSharpWriter for CodeWriter {
    fn namespace(&mut self, name: &str) -> Scope {
        self.write_line(&format!("namespace {name}"));
        self.block()
    }

    fn class(&mut self, name: &str, modifiers: &[&str]) -> Scope {
        for modifier in modifiers {
            self.write(modifier);
            self.write(" ");
        }
        self.write("class ");
        self.write_line(name);
        self.block()
    }

    fn xml_doc(&mut self) -> Scope {
        self.line_prefix("/// ", true)
    }

    fn summary(&mut self) -> Scope {
        self.write_line("<summary>");
        self.closing_line("</summary>")
    }

    fn see(&mut self, cref: &str) {
        self.write(&format!("<see cref=\"{cref}\"/>"));
    }
}
