use tracing::trace;

use crate::{
    ast::BlockStyle,
    interpreter::{
        engine::core::Interpreter,
        parser::statement::{is_block_closer, is_block_header},
    },
};

impl Interpreter {
    /// Finds the line holding the closer of the block opened on `opening`.
    ///
    /// Scanning starts on the line after the opener with one block open. In
    /// terminated style every `if` or `func` header opens a block and every
    /// `end` line closes one. In bracketed style each `{` and `}` counts,
    /// except inside string literals and on comment lines.
    ///
    /// Results are cached per opening line and style, since the listing never
    /// changes during a run.
    ///
    /// # Returns
    /// `None` if the listing ends before the block is closed.
    pub fn find_block_end(&mut self, opening: usize) -> Option<usize> {
        let key = (opening, self.style);
        if let Some(&cached) = self.block_ends.get(&key) {
            return cached;
        }

        let end = match self.style {
            BlockStyle::Terminated => self.scan_terminated(opening),
            BlockStyle::Bracketed => self.scan_bracketed(opening),
        };
        trace!(opening, ?end, style = self.style.name(), "block end");

        self.block_ends.insert(key, end);
        end
    }

    fn scan_terminated(&self, opening: usize) -> Option<usize> {
        let mut depth = 1_usize;

        for (number, line) in self.listing.lines_from(opening + 1) {
            if is_comment(line) {
                continue;
            }
            if is_block_header(line, BlockStyle::Terminated) {
                depth += 1;
            } else if is_block_closer(line, BlockStyle::Terminated) {
                depth -= 1;
                if depth == 0 {
                    return Some(number);
                }
            }
        }

        None
    }

    fn scan_bracketed(&self, opening: usize) -> Option<usize> {
        let mut depth = 1_usize;

        for (number, line) in self.listing.lines_from(opening + 1) {
            if is_comment(line) {
                continue;
            }

            let mut in_string = false;
            let mut chars = line.chars();
            while let Some(c) = chars.next() {
                match c {
                    '"' => in_string = !in_string,
                    '\\' if in_string => {
                        chars.next();
                    },
                    '{' if !in_string => depth += 1,
                    '}' if !in_string => {
                        depth -= 1;
                        if depth == 0 {
                            return Some(number);
                        }
                    },
                    _ => {},
                }
            }
        }

        None
    }
}

fn is_comment(line: &str) -> bool {
    line.trim_start().starts_with('#')
}

#[cfg(test)]
mod tests {
    use crate::{
        ast::BlockStyle,
        interpreter::engine::{config::Config, core::Interpreter},
    };

    fn interpreter(source: &str, style: BlockStyle) -> Interpreter {
        Interpreter::new(source,
                         Config { style,
                                  ..Config::default() })
    }

    #[test]
    fn terminated_blocks_nest() {
        let source = "if true\n  if false\n  end\n  # end\nend\nprintln 1";
        let mut engine = interpreter(source, BlockStyle::Terminated);

        assert_eq!(engine.find_block_end(1), Some(5));
        assert_eq!(engine.find_block_end(2), Some(3));
    }

    #[test]
    fn bracketed_blocks_ignore_strings_and_comments() {
        let source = "if true {\n  println \"}\"\n  # }\n  if x {\n  }\n}";
        let mut engine = interpreter(source, BlockStyle::Bracketed);

        assert_eq!(engine.find_block_end(1), Some(6));
        assert_eq!(engine.find_block_end(4), Some(5));
    }

    #[test]
    fn unclosed_block_has_no_end() {
        let mut engine = interpreter("func f()\n  println 1\n", BlockStyle::Terminated);
        assert_eq!(engine.find_block_end(1), None);
        assert_eq!(engine.find_block_end(1), None);
    }
}
