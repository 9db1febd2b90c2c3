use std::{collections::HashSet, path::Path};

use color_eyre::eyre::{Context, Result, bail};
use rand::{Rng, SeedableRng, rngs::StdRng, seq::IndexedRandom};
use serde::{Deserialize, Serialize};

use super::table::{CellValue, Column, Row};

/// Columns plus rows, as consumed by a table.
///
/// On disk this is a JSON document:
///
/// ```json
/// {
///   "columns": [{ "header": "Name", "accessor": "name" }],
///   "rows": [{ "name": "Alice" }, { "name": null }]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub columns: Vec<Column>,
    #[serde(default)]
    pub rows: Vec<Row>,
}

impl Dataset {
    pub fn new(columns: Vec<Column>, rows: Vec<Row>) -> Result<Self> {
        let dataset = Self { columns, rows };
        dataset.validate()?;
        Ok(dataset)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let dataset: Self = serde_json::from_str(json).context("Error parsing dataset JSON")?;
        dataset.validate()?;
        Ok(dataset)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Error reading dataset {}", path.display()))?;
        let dataset = Self::from_json(&json)
            .with_context(|| format!("Invalid dataset {}", path.display()))?;
        tracing::info!(
            "Loaded {} rows and {} columns from {}",
            dataset.rows.len(),
            dataset.columns.len(),
            path.display()
        );
        Ok(dataset)
    }

    /// Accessors must be unique, otherwise sorting and filtering by column is ambiguous.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for column in &self.columns {
            if !seen.insert(column.accessor.as_str()) {
                bail!("Duplicate column accessor \"{}\"", column.accessor);
            }
        }
        Ok(())
    }

    /// The three people shown by the showcase page.
    pub fn people() -> Self {
        let columns = vec![
            Column::new("Nom", "name"),
            Column::new("Âge", "age"),
            Column::new("Email", "email"),
        ];
        let rows = [
            ("Alice", 25, "alice@example.com"),
            ("Bob", 30, "bob@example.com"),
            ("Charlie", 35, "charlie@example.com"),
        ]
        .into_iter()
        .map(|(name, age, email)| {
            Row::from_iter([
                ("name", CellValue::from(name)),
                ("age", age.into()),
                ("email", email.into()),
            ])
        })
        .collect();
        Self { columns, rows }
    }

    /// `count` random people, reproducible for a given `seed`.
    ///
    /// About one row in ten has no email, so sorting by email shows the
    /// missing values at the end.
    pub fn generated(count: usize, seed: u64) -> Self {
        const FIRST: [&str; 12] = [
            "Alice", "Bob", "Charlie", "Dana", "Eve", "Frank", "Grace", "Heidi", "Ivan", "Judy",
            "Mallory", "Oscar",
        ];
        const LAST: [&str; 8] = [
            "Martin", "Bernard", "Dubois", "Thomas", "Robert", "Richard", "Petit", "Durand",
        ];
        const CITIES: [&str; 6] = ["Paris", "Lyon", "Lille", "Nantes", "Rennes", "Bordeaux"];

        let mut rng = StdRng::seed_from_u64(seed);
        let rows = (1..=count)
            .map(|id| {
                let first = FIRST.choose(&mut rng).copied().unwrap_or("Anon");
                let last = LAST.choose(&mut rng).copied().unwrap_or("Anon");
                let email = if rng.random_ratio(1, 10) {
                    CellValue::Null
                } else {
                    format!("{}.{}@example.com", first, last)
                        .to_lowercase()
                        .into()
                };
                Row::from_iter([
                    ("id", CellValue::from(id as u32)),
                    ("name", format!("{first} {last}").into()),
                    ("age", rng.random_range(18u32..=80).into()),
                    ("city", CITIES.choose(&mut rng).copied().into()),
                    ("email", email),
                    ("active", rng.random_bool(0.7).into()),
                ])
            })
            .collect();

        Self {
            columns: vec![
                Column::new("#", "id"),
                Column::new("Name", "name"),
                Column::new("Age", "age"),
                Column::new("City", "city"),
                Column::new("Email", "email"),
                Column::new("Active", "active"),
            ],
            rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn parse_dataset() {
        let dataset = Dataset::from_json(
            r#"{
                "columns": [
                    { "header": "Name", "accessor": "name" },
                    { "header": "Age", "accessor": "age" }
                ],
                "rows": [
                    { "name": "Alice", "age": 25 },
                    { "name": "Bob", "age": null, "extra": true }
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(dataset.columns[1], Column::new("Age", "age"));
        assert_eq!(dataset.rows.len(), 2);
        assert_eq!(dataset.rows[1].value("age"), None);
        assert_eq!(dataset.rows[1].display("name"), "Bob");
    }

    #[test]
    fn rows_are_optional() {
        let dataset =
            Dataset::from_json(r#"{ "columns": [{ "header": "A", "accessor": "a" }] }"#).unwrap();
        assert!(dataset.rows.is_empty());
    }

    #[test]
    fn duplicate_accessor_is_rejected() {
        let err = Dataset::from_json(
            r#"{ "columns": [
                { "header": "A", "accessor": "a" },
                { "header": "Also A", "accessor": "a" }
            ] }"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("Duplicate column accessor \"a\""));

        assert!(Dataset::new(vec![Column::new("X", "x"), Column::new("X", "x")], vec![]).is_err());
    }

    #[test]
    fn nested_values_are_rejected() {
        let result = Dataset::from_json(
            r#"{ "columns": [{ "header": "A", "accessor": "a" }], "rows": [{ "a": [1, 2] }] }"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        let json = serde_json::to_string(&Dataset::people()).unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let dataset = Dataset::from_path(file.path()).unwrap();
        assert_eq!(dataset, Dataset::people());
    }

    #[test]
    fn missing_file_reports_path() {
        let err = Dataset::from_path("/definitely/not/here.json").unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }

    #[test]
    fn people_sample() {
        let dataset = Dataset::people();
        assert!(dataset.validate().is_ok());
        assert_eq!(dataset.rows.len(), 3);
        assert_eq!(dataset.rows[2].display("age"), "35");
    }

    #[test]
    fn generated_is_reproducible() {
        let a = Dataset::generated(40, 7);
        let b = Dataset::generated(40, 7);
        assert_eq!(a, b);
        assert_eq!(a.rows.len(), 40);
        assert!(a.validate().is_ok());
        assert_eq!(a.rows[39].display("id"), "40");
        assert!(
            a.rows
                .iter()
                .all(|row| a.columns.iter().all(|c| row.keys().any(|k| k == c.accessor)))
        );
    }
}
