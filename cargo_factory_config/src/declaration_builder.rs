// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

use std::fs::File;
use std::io;
use std::path::Path;
use ron::de::from_reader;
use ron::ser::{to_writer_pretty, PrettyConfig};
use serde::{Deserialize, Serialize};
use crate::Declaration;

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct DeclarationBuilder {
    pub declarations: Vec<Declaration>,
}

impl DeclarationBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, declaration: Declaration) {
        self.declarations.push(declaration);
    }

    /// Appends everything from `other`, after our own declarations
    pub fn extend(&mut self, other: DeclarationBuilder) {
        self.declarations.extend(other.declarations);
    }

    // Method to write the DeclarationBuilder to a file
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let file = File::create(path)?;
        to_writer_pretty(file, &self.declarations, PrettyConfig::default())
            .map_err(io::Error::other)?;
        Ok(())
    }

    // Method to read the DeclarationBuilder from a file
    pub fn read_from_file<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let file = File::open(path)?;

        let declarations: Vec<Declaration> = from_reader(file)
            .map_err(io::Error::other)?; // Map ron::de::SpannedError to io::Error

        Ok(DeclarationBuilder { declarations })
    }

    /// Reads several declaration files and concatenates them in the order given.
    /// The result feeds a single processing pass. Errors name the file that failed.
    pub fn read_from_files<P: AsRef<Path>>(paths: &[P]) -> io::Result<Self> {
        let mut builder = DeclarationBuilder::new();
        for path in paths {
            let path = path.as_ref();
            let read = Self::read_from_file(path)
                .map_err(|e| io::Error::new(e.kind(), format!("{}: {e}", path.display())))?;
            builder.extend(read);
        }
        Ok(builder)
    }
}
