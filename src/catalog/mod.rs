use serde::Deserialize;
use serde_json::from_str;

use include_dir::{include_dir, Dir};
use std::error::Error;

static CATALOG_DIR: Dir = include_dir!("src/catalog");

/// a named group of exercises the circuit can be filled from
#[derive(Deserialize, Clone, Debug)]
pub struct Catalog {
    pub name: String,
    pub focus: String,
    pub exercises: Vec<CatalogExercise>,
}

/// one catalog entry: the exercise plus its rep or hold target
#[derive(Deserialize, Clone, Debug)]
pub struct CatalogExercise {
    pub name: String,
    pub detail: String,
}

impl Catalog {
    pub fn new(file_name: &str) -> Self {
        read_catalog_from_file(format!("{}.json", file_name)).unwrap()
    }

    /// ordered exercise names, the shape the sequence builder consumes
    pub fn exercise_names(&self) -> Vec<String> {
        self.exercises.iter().map(|e| e.name.clone()).collect()
    }

    /// rep or hold target for an exercise, if this catalog lists it
    pub fn detail_for(&self, exercise: &str) -> Option<&str> {
        self.exercises
            .iter()
            .find(|e| e.name == exercise)
            .map(|e| e.detail.as_str())
    }
}

fn read_catalog_from_file(file_name: String) -> Result<Catalog, Box<dyn Error>> {
    let file = CATALOG_DIR
        .get_file(file_name)
        .expect("Catalog file not found");

    let file_as_str = file
        .contents_utf8()
        .expect("Unable to interpret file as a string");

    let catalog = from_str(file_as_str).expect("Unable to deserialize catalog json");

    Ok(catalog)
}
