/// Outcome of a rewriting pass.
///
/// A pass that finds nothing to rewrite is not an error: `count` is zero
/// and `html` is byte-identical to the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    pub html: String,
    pub count: usize,
}

impl Substitution {
    pub fn unchanged(html: impl Into<String>) -> Self {
        Self {
            html: html.into(),
            count: 0,
        }
    }

    pub fn changed(&self) -> bool {
        self.count > 0
    }

    /// Run another pass over the current text, accumulating the count.
    pub fn then(self, pass: impl FnOnce(&str) -> Substitution) -> Substitution {
        let next = pass(&self.html);
        Substitution {
            html: next.html,
            count: self.count + next.count,
        }
    }

    pub fn into_html(self) -> String {
        self.html
    }
}
