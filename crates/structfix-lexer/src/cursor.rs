/// Character cursor over Go source text.
///
/// Positions are byte offsets into the original UTF-8 source.
pub struct Cursor<'src> {
    source: &'src str,
    pos: u32,
    chars: std::str::Chars<'src>,
}

impl<'src> Cursor<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            pos: 0,
            chars: source.chars(),
        }
    }

    /// The current character, without consuming it.
    pub fn peek(&self) -> Option<char> {
        self.chars.clone().next()
    }

    /// The character `n` positions ahead; `peek_nth(0)` is `peek()`.
    pub fn peek_nth(&self, n: usize) -> Option<char> {
        self.chars.clone().nth(n)
    }

    /// Consume the current character.
    pub fn advance(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        self.pos += c.len_utf8() as u32;
        Some(c)
    }

    /// Consume the current character if it equals `expected`.
    pub fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub fn pos(&self) -> u32 {
        self.pos
    }

    /// Advance while the predicate holds for the current character.
    pub fn eat_while(&mut self, predicate: impl Fn(char) -> bool) {
        while let Some(c) = self.peek() {
            if predicate(c) {
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Source text between two byte offsets.
    ///
    /// # Panics
    ///
    /// Panics if start or end are out of bounds or not on UTF-8 boundaries.
    pub fn slice(&self, start: u32, end: u32) -> &'src str {
        &self.source[start as usize..end as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peek_does_not_advance() {
        let cursor = Cursor::new("ab");
        assert_eq!(cursor.peek(), Some('a'));
        assert_eq!(cursor.peek(), Some('a'));
        assert_eq!(cursor.pos(), 0);
    }

    #[test]
    fn peek_nth_looks_ahead() {
        let cursor = Cursor::new("...");
        assert_eq!(cursor.peek_nth(0), Some('.'));
        assert_eq!(cursor.peek_nth(2), Some('.'));
        assert_eq!(cursor.peek_nth(3), None);
    }

    #[test]
    fn advance_tracks_multibyte_utf8() {
        // U+00E9 (e with accent) is 2 bytes in UTF-8
        let mut cursor = Cursor::new("\u{00E9}a");
        assert_eq!(cursor.advance(), Some('\u{00E9}'));
        assert_eq!(cursor.pos(), 2);
        assert_eq!(cursor.advance(), Some('a'));
        assert_eq!(cursor.pos(), 3);
        assert_eq!(cursor.peek(), None);
    }

    #[test]
    fn eat_matches_only_expected() {
        let mut cursor = Cursor::new(":=");
        assert!(!cursor.eat('='));
        assert!(cursor.eat(':'));
        assert!(cursor.eat('='));
        assert_eq!(cursor.peek(), None);
    }

    #[test]
    fn eat_while_and_slice() {
        let mut cursor = Cursor::new("abc123 rest");
        cursor.eat_while(|c| c.is_alphanumeric());
        assert_eq!(cursor.pos(), 6);
        assert_eq!(cursor.slice(0, 6), "abc123");
    }
}
