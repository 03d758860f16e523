//! Bit identifiers and the registers that hand them out.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;

use crate::error::{IrError, IrResult};

/// Circuit-wide index of a qubit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct QubitId(pub u32);

/// Circuit-wide index of a classical bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ClbitId(pub u32);

impl From<u32> for QubitId {
    fn from(index: u32) -> Self {
        QubitId(index)
    }
}

impl From<u32> for ClbitId {
    fn from(index: u32) -> Self {
        ClbitId(index)
    }
}

/// A named run of consecutive bits.
///
/// Positions are register-local; [`Register::get`] turns them into
/// circuit-wide ids and refuses anything outside `0..len`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Register<T> {
    name: String,
    offset: u32,
    size: u32,
    #[serde(skip)]
    kind: PhantomData<T>,
}

pub type QuantumRegister = Register<QubitId>;
pub type ClassicalRegister = Register<ClbitId>;

impl<T: From<u32>> Register<T> {
    pub(crate) fn new(name: impl Into<String>, offset: u32, size: u32) -> Self {
        Self {
            name: name.into(),
            offset,
            size,
            kind: PhantomData,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> u32 {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn get(&self, position: u32) -> IrResult<T> {
        if position < self.size {
            Ok(T::from(self.offset + position))
        } else {
            Err(IrError::RegisterIndexOutOfRange {
                register: self.name.clone(),
                index: position,
                size: self.size,
            })
        }
    }

    /// Ids from position 0 upward.
    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        (self.offset..self.offset + self.size).map(T::from)
    }
}

impl<T> fmt::Display for Register<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.name, self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positions_are_offset() {
        let q = QuantumRegister::new("q", 3, 2);
        assert_eq!(q.get(1).unwrap(), QubitId(4));
        assert_eq!(q.iter().collect::<Vec<_>>(), [QubitId(3), QubitId(4)]);
        assert_eq!(q.to_string(), "q[2]");
    }

    #[test]
    fn test_out_of_range() {
        let c = ClassicalRegister::new("c", 0, 3);
        let err = c.get(3).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Index 3 out of range for register 'c' of size 3"
        );
    }

    #[test]
    fn test_empty_register() {
        let q = QuantumRegister::new("q", 0, 0);
        assert!(q.is_empty());
        assert!(q.get(0).is_err());
        assert_eq!(q.iter().count(), 0);
    }
}
