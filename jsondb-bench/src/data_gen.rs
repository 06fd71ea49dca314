//! Data generators for benchmarks

use jsondb::collection::Document;
use jsondb::doc;
use rand::Rng;

const CITIES: [&str; 6] = ["Paris", "Lisbon", "Oslo", "Kyoto", "Lima", "Austin"];

/// Generate one document with a deterministic shape for index `i`
pub fn generate_single_doc(i: usize) -> Document {
    doc! {
        id: i,
        name: (format!("User {}", i)),
        email: (format!("user{}@example.com", i)),
        age: ((i % 80 + 18) as i64),
        active: (i % 2 == 0),
    }
}

/// Generate simple documents with random ages and cities
pub fn generate_simple_docs(count: usize) -> Vec<Document> {
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|i| {
            let age: i64 = rng.gen_range(18..90);
            let score: f64 = rng.gen_range(0.0..100.0);
            let city = CITIES[rng.gen_range(0..CITIES.len())];
            doc! {
                id: i,
                name: (format!("User {}", i)),
                age: age,
                score: score,
                address: { city: city, zip: (rng.gen_range(10000..99999)) },
                tags: ["bench", (format!("group-{}", i % 10))],
            }
        })
        .collect()
}
