extern crate ordinal_neighbours;

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use ordinal_neighbours::analysis::*;
    use ordinal_neighbours::data::{Field, Preference};
    use ordinal_neighbours::utils::*;

    const METADATA: &str = r#"[
        {"name": "id", "type": "nominal", "role": "description"},
        {"name": "buying", "type": "nominal", "values": ["low", "med", "high"]},
        {"name": "doors", "type": "numeric"},
        {"name": "colour", "type": "nominal", "values": ["red"], "active": false},
        {"name": "class", "type": "nominal", "values": ["unacc", "acc", "good"],
         "role": "decision", "preference": "gain"}
    ]"#;

    /// A fresh directory under the system temporary directory.
    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("ordinal-neighbours-{}-{}", name,
                                                    std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn load_table_from_metadata_and_csv() {
        let dir = scratch_dir("load");
        let metadata = dir.join("cars.json");
        let data = dir.join("cars.csv");
        fs::write(&metadata, METADATA).unwrap();
        fs::write(&data, "a,low,2,red,unacc\n\
                          b,high,?,red,good\n\
                          c,?,4,red,acc\n\
                          d,med,,red,unacc\n").unwrap();

        let table = load_table(&metadata, &data, b',').unwrap();

        assert_eq!(table.n_objects(), 4);
        assert_eq!(table.n_attributes(), 2);
        assert_eq!(table.attributes()[0].name, "buying");
        assert_eq!(table.attributes()[1].name, "doors");
        assert_eq!(table.decision_attribute().preference, Preference::Gain);
        assert_eq!(table.field(0, 0), Field::Nominal(0));
        assert_eq!(table.field(1, 1), Field::Missing);
        assert_eq!(table.field(2, 0), Field::Missing);
        assert_eq!(table.field(2, 1), Field::Numeric(4.));
        assert_eq!(table.field(3, 1), Field::Missing);

        let classes = table.classes().iter().map(|d| d.label()).collect::<Vec<_>>();
        assert_eq!(classes, vec!["unacc", "acc", "good"]);
        assert_eq!(table.decision_distribution(), vec![2, 1, 1]);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn load_table_rejects_malformed_input() {
        let dir = scratch_dir("malformed");
        let metadata = dir.join("cars.json");
        fs::write(&metadata, METADATA).unwrap();

        let unknown_value = dir.join("unknown.csv");
        fs::write(&unknown_value, "a,cheap,2,red,unacc\n").unwrap();
        assert!(load_table(&metadata, &unknown_value, b',').is_err());

        let missing_decision = dir.join("missing.csv");
        fs::write(&missing_decision, "a,low,2,red,?\n").unwrap();
        assert!(load_table(&metadata, &missing_decision, b',').is_err());

        let short_row = dir.join("short.csv");
        fs::write(&short_row, "a,low,2\n").unwrap();
        assert!(load_table(&metadata, &short_row, b',').is_err());

        let no_decision = dir.join("no-decision.json");
        fs::write(&no_decision, r#"[{"name": "x", "type": "numeric"}]"#).unwrap();
        assert!(load_table(&no_decision, &unknown_value, b',').is_err());

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn store_results_writes_one_file_per_family() {
        let dir = scratch_dir("store");
        let metadata = dir.join("grades.json");
        let data = dir.join("grades.csv");
        fs::write(&metadata, r#"[
            {"name": "score", "type": "numeric"},
            {"name": "grade", "type": "numeric", "role": "decision", "preference": "gain"}
        ]"#).unwrap();
        let rows = (0..6).map(|i| format!("{};1\n", i))
                         .chain((20..27).map(|i| format!("{};2\n", i)))
                         .collect::<String>();
        fs::write(&data, rows).unwrap();

        let table = load_table(&metadata, &data, b';').unwrap();
        let results = NeighbourhoodAnalysis::new(&table, AnalysisConfig::default())
                                            .unwrap()
                                            .run()
                                            .unwrap();
        let out = dir.join("results");
        store_results(&results, &out).unwrap();

        let union_knn = fs::read_to_string(out.join("union_vs_union_knn.csv")).unwrap();
        // The lower grade is the smaller union, hence the minority.
        let expected = (0..6).map(|i| format!("{};SAFE;1;2\n", i))
                             .collect::<String>();
        assert_eq!(union_knn,
                   format!("index;type;minority_decision;majority_decision\n{}", expected));
        for family in Family::ALL.iter() {
            assert!(out.join(format!("{}.csv", family.name())).is_file());
        }

        let summary = results.get(Family::ALL[0]).unwrap().distribution().summary("grades");
        store_summary(&[summary], dir.join("summary.csv")).unwrap();
        let summary = fs::read_to_string(dir.join("summary.csv")).unwrap();
        assert_eq!(summary, "name;safe;borderline;rare;outlier\n\
                             grades;100.0;0.0;0.0;0.0\n");

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn empty_result_keeps_header() {
        let dir = scratch_dir("empty");
        let path = dir.join("empty.csv");
        let family = Family { comparison: Comparison::ClassVsUnion, strategy: Strategy::Kernel };

        store_result(&AnalysisResult::new(family), &path).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(),
                   "index;type;minority_decision;majority_decision\n");
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn dataset_pairs_match_file_stems() {
        let dir = scratch_dir("pairs");
        let (metadata, data) = (dir.join("metadata"), dir.join("data"));
        fs::create_dir_all(&metadata).unwrap();
        fs::create_dir_all(&data).unwrap();
        for name in &["wine", "cars", "orphan"] {
            fs::write(metadata.join(format!("{}.json", name)), "[]").unwrap();
        }
        for name in &["cars", "wine", "lonely"] {
            fs::write(data.join(format!("{}.csv", name)), "").unwrap();
        }

        let pairs = dataset_pairs(&metadata, &data).unwrap();

        assert_eq!(pairs, vec![
            ("cars".to_string(), metadata.join("cars.json"), data.join("cars.csv")),
            ("wine".to_string(), metadata.join("wine.json"), data.join("wine.csv")),
        ]);
        fs::remove_dir_all(&dir).unwrap();
    }
}
