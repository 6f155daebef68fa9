//! JSONL output for simulation records.

use std::fs::File;
use std::io::{self, BufWriter, Write};

use crate::simulator::GameRecord;

pub struct OutputWriter {
    out: BufWriter<File>,
}

impl OutputWriter {
    pub fn create(path: &str) -> io::Result<Self> {
        Ok(Self {
            out: BufWriter::new(File::create(path)?),
        })
    }

    pub fn write_game(&mut self, game: &GameRecord) -> io::Result<()> {
        serde_json::to_writer(&mut self.out, game)?;
        self.out.write_all(b"\n")
    }
}
