use bumpalo::Bump;
use std::collections::HashMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Symbol(pub(crate) usize);

pub struct Interner<'a> {
    arena: &'a Bump,
    map: HashMap<&'a str, Symbol>,
    vec: Vec<&'a str>,
}

impl<'a> Interner<'a> {
    pub fn new(arena: &'a Bump) -> Self {
        // reserve the first position for a default value
        let mut vec = Vec::new();
        vec.push("default");

        Self {
            arena,
            map: HashMap::new(),
            vec,
        }
    }

    pub fn intern(&mut self, s: &str) -> Symbol {
        if let Some(&sym) = self.map.get(s) {
            return sym;
        }

        let sym = Symbol(self.vec.len());

        // Allocate the string in the bump arena
        let stored: &'a str = self.arena.alloc_str(s);

        self.vec.push(stored);
        self.map.insert(stored, sym);

        sym
    }

    pub fn lookup(&self, sym: Symbol) -> &'a str {
        self.vec[sym.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_the_same_text_twice_returns_the_same_symbol() {
        let arena = Bump::new();
        let mut interner = Interner::new(&arena);
        let a = interner.intern("write");
        let b = interner.intern("write");
        assert_eq!(a, b);
    }

    #[test]
    fn distinct_text_interns_to_distinct_symbols() {
        let arena = Bump::new();
        let mut interner = Interner::new(&arena);
        let a = interner.intern("read");
        let b = interner.intern("write");
        assert_ne!(a, b);
    }

    #[test]
    fn lookup_round_trips_the_original_text() {
        let arena = Bump::new();
        let mut interner = Interner::new(&arena);
        let sym = interner.intern("fibonacci");
        assert_eq!(interner.lookup(sym), "fibonacci");
    }
}
