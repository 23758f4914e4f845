use crate::api::*;

/// Interned identifier. Two identifiers with the same text always get the
/// same symbol.
#[derive(Debug, Hash, Eq, PartialEq, PartialOrd, Ord, Clone, Copy, Serialize)]
#[serde(transparent)]
pub struct Symbol(u32);

impl Symbol {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

// TODO: This scatters the string values all over the heap. Storing the names
// in one buffer and keying the map by range would need a custom hasher.
#[derive(Debug, Default)]
pub struct SymbolTable {
    to_symbol: HashMap<String, Symbol>,
    to_name: Vec<String>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self {
            to_symbol: HashMap::new(),
            to_name: Vec::new(),
        }
    }

    pub fn add_str(&mut self, s: &str) -> Symbol {
        if let Some(&id) = self.to_symbol.get(s) {
            return id;
        }

        let id = Symbol(self.to_name.len() as u32);
        self.to_symbol.insert(s.to_string(), id);
        self.to_name.push(s.to_string());
        return id;
    }

    pub fn lookup(&self, s: &str) -> Option<Symbol> {
        self.to_symbol.get(s).copied()
    }

    pub fn to_str(&self, id: Symbol) -> Option<&str> {
        return self.to_name.get(id.index()).map(|a| &**a);
    }

    pub fn names(&self) -> &[String] {
        &self.to_name
    }

    pub fn len(&self) -> usize {
        self.to_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.to_name.is_empty()
    }
}
