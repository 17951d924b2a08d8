//! Constant pool shared by the chunks of one rule set.
//!
//! Holds literal values and the symbolic field references that field
//! instructions name by index.

use rustc_hash::FxHashMap;

/// Values stored in the constant pool.
#[derive(Debug, Clone, PartialEq)]
pub enum Constant {
    /// Integer literal (`int` and `long` both fit).
    Int(i64),
    Float64(f64),
    StringData(Vec<u8>),
    /// Symbolic reference resolved by the loader when the code is linked.
    FieldRef {
        /// Internal name of the declaring class, e.g. `com/acme/Config`.
        owner: String,
        name: String,
        /// Value descriptor, e.g. `J`.
        descriptor: String,
    },
}

/// Constant pool with deduplication.
#[derive(Debug, Clone, Default)]
pub struct ConstantPool {
    constants: Vec<Constant>,
    index: FxHashMap<ConstantKey, u32>,
}

/// Hashable mirror of [`Constant`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum ConstantKey {
    Int(i64),
    Float64(u64), // Bit pattern for hashing
    StringData(Vec<u8>),
    FieldRef(String, String, String),
}

impl ConstantPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or get existing constant, returns index.
    pub fn add(&mut self, constant: Constant) -> u32 {
        let key = Self::to_key(&constant);

        if let Some(&idx) = self.index.get(&key) {
            return idx;
        }

        let idx = self.constants.len() as u32;
        self.constants.push(constant);
        self.index.insert(key, idx);
        idx
    }

    pub fn add_field_ref(&mut self, owner: String, name: String, descriptor: String) -> u32 {
        self.add(Constant::FieldRef {
            owner,
            name,
            descriptor,
        })
    }

    pub fn get(&self, index: u32) -> Option<&Constant> {
        self.constants.get(index as usize)
    }

    pub fn constants(&self) -> &[Constant] {
        &self.constants
    }

    pub fn len(&self) -> usize {
        self.constants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constants.is_empty()
    }

    fn to_key(constant: &Constant) -> ConstantKey {
        match constant {
            Constant::Int(v) => ConstantKey::Int(*v),
            Constant::Float64(v) => ConstantKey::Float64(v.to_bits()),
            Constant::StringData(v) => ConstantKey::StringData(v.clone()),
            Constant::FieldRef {
                owner,
                name,
                descriptor,
            } => ConstantKey::FieldRef(owner.clone(), name.clone(), descriptor.clone()),
        }
    }
}
