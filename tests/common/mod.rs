#![allow(dead_code)]

use keypareto::config::LanguageWeights;
use keypareto::corpus::Corpus;
use keypareto::geometry::KeyboardGeometry;
use keypareto::scorer::Scorer;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const ENGLISH: &[(&str, u64)] = &[
    ("the", 500),
    ("of", 320),
    ("and", 300),
    ("to", 280),
    ("in", 200),
    ("is", 150),
    ("that", 120),
    ("it", 110),
    ("was", 90),
    ("for", 85),
    ("on", 80),
    ("with", 70),
    ("they", 60),
    ("be", 55),
    ("at", 50),
    ("have", 45),
    ("this", 40),
    ("from", 38),
    ("word", 30),
    ("quick", 12),
    ("jazz", 5),
    ("box", 5),
    ("don't", 4),
    ("e-mail", 2),
];

pub const FINNISH: &[(&str, u64)] = &[
    ("ja", 400),
    ("on", 300),
    ("ei", 200),
    ("se", 180),
    ("että", 150),
    ("hän", 120),
    ("oli", 110),
    ("ovat", 70),
    ("mutta", 65),
    ("kun", 60),
    ("niin", 55),
    ("kuin", 50),
    ("tämä", 45),
    ("myös", 30),
    ("hyvä", 25),
    ("päivä", 20),
    ("yö", 10),
    ("kylmä", 8),
];

pub fn english() -> Corpus {
    Corpus::from_pairs("english", ENGLISH.iter().copied())
}

pub fn finnish() -> Corpus {
    Corpus::from_pairs("finnish", FINNISH.iter().copied())
}

pub fn standard_geometry() -> KeyboardGeometry {
    KeyboardGeometry::standard()
}

pub fn scorer() -> Scorer {
    Scorer::from_corpora(&english(), &finnish(), LanguageWeights::default())
        .expect("fixture corpora are non-empty")
}

pub fn write_json_corpus(dir: &Path, file: &str, words: &[(&str, u64)]) -> PathBuf {
    let path = dir.join(file);
    let body: Vec<String> = words
        .iter()
        .map(|(w, c)| format!("{}: {}", serde_json::to_string(w).unwrap(), c))
        .collect();
    let mut f = File::create(&path).unwrap();
    write!(f, "{{{}}}", body.join(", ")).unwrap();
    path
}

pub fn write_tsv_corpus(dir: &Path, file: &str, lines: &[&str]) -> PathBuf {
    let path = dir.join(file);
    let mut f = File::create(&path).unwrap();
    for line in lines {
        writeln!(f, "{}", line).unwrap();
    }
    path
}
