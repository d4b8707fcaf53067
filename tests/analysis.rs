extern crate ordinal_neighbours;
extern crate ndarray;
extern crate approx;
extern crate rand;
extern crate pcg_rand;

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use approx::assert_abs_diff_eq;
    use ndarray::prelude::*;
    use pcg_rand::Pcg32;
    use rand::{Rng, SeedableRng};

    use ordinal_neighbours::analysis::*;
    use ordinal_neighbours::analyzer::LearningExampleType;
    use ordinal_neighbours::data::*;
    use ordinal_neighbours::measure::*;

    const UNION_KNN: Family = Family {
        comparison: Comparison::UnionVsUnion,
        strategy: Strategy::Knn,
    };
    const UNION_KERNEL: Family = Family {
        comparison: Comparison::UnionVsUnion,
        strategy: Strategy::Kernel,
    };

    /// Builds a one-attribute table from (value, class) pairs.
    fn line_table(points: &[(f64, usize)]) -> InformationTable {
        let inputs = Array::from_shape_vec((points.len(), 1),
                                           points.iter().map(|p| p.0).collect())
                           .unwrap();
        let targets = points.iter().map(|p| p.1).collect::<Array1<usize>>();

        InformationTable::from_inputs(&inputs.view(), &targets.view()).unwrap()
    }

    /// Minority examples (class 1) whose 5 nearest neighbours, at
    /// thresholds 4/2/1, are tuned to each type; groups lie 1000 apart.
    fn four_way_mix() -> Vec<(f64, usize)> {
        let mut points = vec![];
        let mut group = 0.;
        let mut next_group = || {
            group += 1000.;
            group
        };

        // SAFE: six minority examples, nothing else around.
        let g = next_group();
        points.extend((0..6).map(|i| (g + i as f64, 1)));

        // BORDERLINE: minority and majority alternate.
        let g = next_group();
        points.extend((0..6).map(|i| (g + i as f64, 1)));
        points.extend((0..5).map(|i| (g + i as f64 + 0.5, 0)));

        // RARE: isolated minority pairs.
        for _ in 0..3 {
            let g = next_group();
            points.extend(vec![(g, 1), (g + 1., 1)]);
            points.extend((1..5).map(|i| (g - i as f64, 0)));
            points.extend((1..5).map(|i| (g + 1. + i as f64, 0)));
        }

        // OUTLIER: single minority examples.
        for _ in 0..6 {
            let g = next_group();
            points.push((g, 1));
            points.extend((1..4).flat_map(|i| vec![(g - i as f64, 0), (g + i as f64, 0)]));
        }

        points
    }

    fn minority_indices(points: &[(f64, usize)]) -> BTreeSet<usize> {
        (0..points.len()).filter(|&i| points[i].1 == 1).collect()
    }

    #[test]
    fn pure_neighbourhoods_are_safe() {
        let mut points = (0..10).map(|i| (i as f64, 1)).collect::<Vec<_>>();
        points.extend((1000..1020).map(|i| (i as f64, 0)));
        let table = line_table(&points);

        let analysis = NeighbourhoodAnalysis::new(&table, AnalysisConfig::default()).unwrap();
        let results = analysis.run().unwrap();

        for &family in &[UNION_KNN, UNION_KERNEL] {
            let result = results.get(family).unwrap();
            assert_eq!(result.len(), 10);
            assert_eq!(result.distribution().percentage(LearningExampleType::Safe), 100.);
            assert!(result.rows().iter().all(|r| r.minority_decision == "1"
                                                 && r.majority_decision == "0"));
        }
    }

    #[test]
    fn alternating_neighbourhoods_are_borderline() {
        let mut points = vec![];
        for g in &[0., 1000.] {
            points.extend((0..6).map(|i| (g + i as f64, 1)));
            points.extend((0..5).map(|i| (g + i as f64 + 0.5, 0)));
        }
        points.extend((0..20).map(|i| (5000. + i as f64, 0)));
        let table = line_table(&points);

        let analysis = NeighbourhoodAnalysis::new(&table, AnalysisConfig::default()).unwrap();
        let result = analysis.run().unwrap();
        let result = result.get(UNION_KNN).unwrap();

        assert_eq!(result.len(), 12);
        assert_eq!(result.distribution().percentage(LearningExampleType::Borderline), 100.);
    }

    #[test]
    fn four_way_mix_is_split_evenly() {
        let points = four_way_mix();
        let table = line_table(&points);

        for &knn_rule in &[KnnRule::SameClassCount, KnnRule::MutualNeighbour] {
            let config = AnalysisConfig { knn_rule, ..Default::default() };
            let analysis = NeighbourhoodAnalysis::new(&table, config).unwrap();
            let results = analysis.run().unwrap();
            let distribution = results.get(UNION_KNN).unwrap().distribution();

            assert_eq!(distribution.total(), 24);
            for &t in LearningExampleType::ALL.iter() {
                assert_eq!(distribution.count(t), 6, "{:?} with {:?}", t, knn_rule);
                assert_eq!(distribution.percentage(t), 25.);
            }
        }
    }

    #[test]
    fn every_minority_example_is_labelled_once() {
        let points = four_way_mix();
        let table = line_table(&points);
        let analysis = NeighbourhoodAnalysis::new(&table, AnalysisConfig::default()).unwrap();
        let results = analysis.run().unwrap();

        for &family in &[UNION_KNN, UNION_KERNEL] {
            let indices = results.get(family)
                                 .unwrap()
                                 .rows()
                                 .iter()
                                 .map(|r| r.index)
                                 .collect::<Vec<_>>();
            assert_eq!(indices.len(), 24);
            assert_eq!(indices.iter().cloned().collect::<BTreeSet<_>>(),
                       minority_indices(&points));
        }
    }

    #[test]
    fn analysis_is_deterministic() {
        let table = line_table(&four_way_mix());
        let config = AnalysisConfig { knn_rule: KnnRule::MutualNeighbour, ..Default::default() };

        let first = NeighbourhoodAnalysis::new(&table, config).unwrap().run().unwrap();
        let second = NeighbourhoodAnalysis::new(&table, config).unwrap().run().unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn numeric_distances() {
        let points = (0..10).map(|i| (i as f64, if i < 5 { 0 } else { 1 }))
                            .collect::<Vec<_>>();
        let table = line_table(&points);
        let distances = DistanceArray::new(&Hvdm::new(&table));

        // Population standard deviation of 0, ..., 9.
        let sigma = 2.8722813232690143;
        for i in 0..10 {
            for j in 0..10 {
                let expected = (i as f64 - j as f64).abs() / (4. * sigma);
                assert_abs_diff_eq!(distances.distance(i, j).unwrap(), expected,
                                    epsilon = 1e-2);
            }
        }
    }

    #[test]
    fn random_mixed_table_distances() {
        let mut rng = Pcg32::seed_from_u64(42);
        let n = 40;
        let colours = ["red", "green", "blue"];

        let attributes = vec![Attribute::numeric("weight"),
                              Attribute::nominal("colour", &colours),
                              Attribute::numeric("height")];
        let fields = Array::from_shape_fn((n, 3), |(_, a)| {
            if rng.gen_bool(0.1) {
                return Field::Missing;
            }
            match a {
                1 => Field::Nominal(rng.gen_range(0..colours.len())),
                _ => Field::Numeric(rng.gen_range(-10.0..10.0)),
            }
        });
        let decisions = (0..n).map(|i| {
                                  let y = i % 3;
                                  Decision::new(&y.to_string(), y as f64)
                              })
                              .collect();
        let table = InformationTable::new(attributes, Attribute::numeric("grade"), fields,
                                          decisions).unwrap();
        let hvdm = Hvdm::new(&table);
        let distances = DistanceArray::new(&hvdm);

        assert_eq!(distances.len(), n);
        for i in 0..n {
            assert_eq!(distances.distance(i, i).unwrap(), 0.);
            for j in 0..n {
                let d = distances.distance(i, j).unwrap();
                assert!(d >= 0. && d.is_finite());
                assert_eq!(d, distances.distance(j, i).unwrap());
                if i != j {
                    assert_eq!(d, hvdm.distance(i, j));
                }
            }
        }
        assert!(distances.distance(n, 0).is_err());
    }
}
