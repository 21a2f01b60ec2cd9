//! LaTeX markup helpers.
//!
//! Small builders shared by the fragment store, the appendix transformer and
//! the document assembler. Everything here produces plain strings; nothing
//! touches the filesystem.

/// Escape text so it typesets literally.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str(r"\textbackslash{}"),
            '&' | '%' | '$' | '#' | '_' | '{' | '}' => {
                out.push('\\');
                out.push(c);
            }
            '~' => out.push_str(r"\textasciitilde{}"),
            '^' => out.push_str(r"\textasciicircum{}"),
            _ => out.push(c),
        }
    }
    out
}

/// `\name{argument}` with the argument escaped.
pub fn command(name: &str, argument: &str) -> String {
    format!("\\{}{{{}}}", name, escape(argument))
}

/// `\input{path}`; the path is used verbatim.
pub fn input(path: &str) -> String {
    format!("\\input{{{}}}", path)
}

/// Accumulates the body of a tabular-like environment row by row.
///
/// Cells passed to [`TabularWriter::row`] must already be escaped.
pub struct TabularWriter {
    out: String,
}

impl TabularWriter {
    /// Open `\begin{env}` with the given raw arguments, e.g. `{l r r}`.
    pub fn begin(env: &str, args: &str) -> Self {
        Self { out: format!("\\begin{{{}}}{}\n", env, args) }
    }

    pub fn row<S: AsRef<str>>(&mut self, cells: &[S]) -> &mut Self {
        let joined: Vec<&str> = cells.iter().map(|c| c.as_ref()).collect();
        self.out.push_str(&joined.join(" & "));
        self.out.push_str(" \\\\\n");
        self
    }

    /// Append a raw line (rules, `\endhead`, `\multicolumn` rows).
    pub fn raw(&mut self, line: &str) -> &mut Self {
        self.out.push_str(line);
        self.out.push('\n');
        self
    }

    pub fn end(mut self, env: &str) -> String {
        self.out.push_str(&format!("\\end{{{}}}\n", env));
        self.out
    }
}
