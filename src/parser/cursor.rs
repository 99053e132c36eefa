//! Whitespace token cursor used by the identifier and reference parsers

/// An owned list of whitespace-separated tokens and a read position
#[derive(Debug, Clone)]
pub(crate) struct TokenCursor<'a> {
    tokens: Vec<&'a str>,
    pos: usize,
}

impl<'a> TokenCursor<'a> {
    pub(crate) fn new(tokens: Vec<&'a str>) -> Self {
        Self { tokens, pos: 0 }
    }

    /// Split `input` on whitespace
    pub(crate) fn tokenize(input: &'a str) -> Self {
        Self::new(input.split_whitespace().collect())
    }

    /// Current token, without advancing
    pub(crate) fn peek(&self) -> Option<&'a str> {
        self.tokens.get(self.pos).copied()
    }

    /// Token `offset` places past the current one, without advancing
    pub(crate) fn peek_ahead(&self, offset: usize) -> Option<&'a str> {
        self.tokens.get(self.pos + offset).copied()
    }

    /// Number of tokens not yet consumed
    pub(crate) fn remaining(&self) -> usize {
        self.tokens.len() - self.pos
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Position of the first token at or after the cursor matching `pred`, or
    /// the token count if none does
    pub(crate) fn position(&self, pred: impl Fn(&str) -> bool) -> usize {
        self.tokens[self.pos..]
            .iter()
            .position(|tok| pred(tok))
            .map_or(self.tokens.len(), |i| self.pos + i)
    }

    /// Split off the tokens up to `end` into a new cursor, leaving this one
    /// positioned at `end`
    pub(crate) fn take_until(&mut self, end: usize) -> TokenCursor<'a> {
        let taken = self.tokens[self.pos..end].to_vec();
        self.pos = end;
        TokenCursor::new(taken)
    }
}

impl<'a> Iterator for TokenCursor<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let tok = self.peek()?;
        self.pos += 1;
        Some(tok)
    }
}
