/// The lines of a script, numbered from 1.
///
/// Index 0 holds an empty sentinel so that line numbers can be used as
/// indices directly. Line `len() + 1` is the end of the listing: jumping there
/// finishes the run.
#[derive(Debug, Clone, Default)]
pub struct Listing {
    lines: Vec<String>,
}

impl Listing {
    /// Splits `source` into lines. `\n` and `\r\n` both end a line.
    ///
    /// # Example
    /// ```
    /// use snx::interpreter::engine::listing::Listing;
    ///
    /// let listing = Listing::new("var x = 1\nprintln x\n");
    /// assert_eq!(listing.len(), 2);
    /// assert_eq!(listing.get(2), Some("println x"));
    /// assert_eq!(listing.get(0), None);
    /// assert_eq!(listing.end(), 3);
    /// ```
    #[must_use]
    pub fn new(source: &str) -> Self {
        let lines = std::iter::once(String::new()).chain(source.lines().map(str::to_string))
                                                  .collect();
        Self { lines }
    }

    /// Returns the number of script lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len() - 1
    }

    /// Returns `true` if the script has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the line number just past the last line.
    #[must_use]
    pub fn end(&self) -> usize {
        self.lines.len()
    }

    /// Returns line `number`, or `None` outside `1..=len()`.
    #[must_use]
    pub fn get(&self, number: usize) -> Option<&str> {
        if number == 0 {
            return None;
        }
        self.lines.get(number).map(String::as_str)
    }

    /// Iterates over the numbered lines starting at `first`.
    pub fn lines_from(&self, first: usize) -> impl Iterator<Item = (usize, &str)> {
        self.lines
            .iter()
            .enumerate()
            .skip(first.max(1))
            .map(|(number, line)| (number, line.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_source_has_no_lines() {
        let listing = Listing::new("");
        assert!(listing.is_empty());
        assert_eq!(listing.end(), 1);
        assert_eq!(listing.get(1), None);
    }

    #[test]
    fn lines_from_skips_the_sentinel() {
        let listing = Listing::new("a\r\nb\nc");
        let numbered: Vec<_> = listing.lines_from(0).collect();
        assert_eq!(numbered, vec![(1, "a"), (2, "b"), (3, "c")]);
        assert_eq!(listing.lines_from(3).count(), 1);
    }
}
