//! CBOR persistence for straight-line programs.
//!
//! Programs are stored as their list of assignments. Decoding goes through
//! `Slp::new`, so an empty list is rejected; references are, as always,
//! validated lazily.

use crate::core::Slp;

impl Slp {
    /// Serializes the program to CBOR bytes.
    pub fn to_cbor(&self) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
        let bytes = serde_cbor::to_vec(self)?;
        Ok(bytes)
    }

    /// Deserializes a program from CBOR bytes.
    pub fn from_cbor(bytes: &[u8]) -> Result<Self, Box<dyn std::error::Error>> {
        let slp: Self = serde_cbor::from_slice(bytes)?;
        Ok(slp)
    }

    /// Saves the program to a file in CBOR format.
    pub fn save_to_file(&self, path: &std::path::Path) -> Result<(), Box<dyn std::error::Error>> {
        let bytes = self.to_cbor()?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Loads a program from a CBOR file.
    pub fn load_from_file(path: &std::path::Path) -> Result<Self, Box<dyn std::error::Error>> {
        let bytes = std::fs::read(path)?;
        Self::from_cbor(&bytes)
    }
}
