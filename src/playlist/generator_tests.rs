#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::duration::TrackDuration;
    use crate::error::MixerError;
    use crate::models::{Source, SourceType, Track};
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use rand::rngs::StdRng;
    use rand::rngs::mock::StepRng;
    use rand::{RngCore, SeedableRng};
    use std::collections::HashMap;

    fn create_track(id: &str, weight: f64, is_required: bool, allow_repeated: bool) -> Track {
        let duration = TrackDuration::from_minutes_seconds(3, 30);
        Track::new(id, format!("Track {id}"), "Test Artist", duration)
            .with_weight(weight)
            .required(is_required)
            .repeatable(allow_repeated)
    }

    fn create_source(id: &str, source_type: SourceType, tracks: Vec<Track>) -> Source {
        Source::new(id, format!("Source {id}"), source_type).with_tracks(tracks)
    }

    /// Two sources mixing every parameter combination
    fn create_mixed_sources() -> Vec<Source> {
        vec![
            create_source(
                "album",
                SourceType::Album,
                vec![
                    create_track("a1", 1.0, true, false),
                    create_track("a2", 2.5, false, false),
                    create_track("a3", 0.1, false, true),
                    create_track("a4", 5.0, false, false),
                    create_track("a5", 1.0, true, true),
                ],
            ),
            create_source(
                "playlist",
                SourceType::Playlist,
                vec![
                    create_track("p1", 1.0, false, false),
                    create_track("p2", 3.0, false, true),
                    create_track("p3", 0.5, true, false),
                    create_track("p4", 1.5, false, false),
                ],
            ),
        ]
    }

    fn occurrences(entries: &[GeneratedEntry]) -> HashMap<(String, String), usize> {
        let mut counts = HashMap::new();
        for entry in entries {
            *counts
                .entry((entry.source_id.clone(), entry.track.id.clone()))
                .or_insert(0) += 1;
        }
        counts
    }

    fn ids(entries: &[GeneratedEntry]) -> Vec<&str> {
        entries.iter().map(|entry| entry.track.id.as_str()).collect()
    }

    #[test]
    fn test_required_track_wins_when_no_room_is_left() {
        let sources = vec![create_source(
            "1",
            SourceType::Album,
            vec![create_track("A", 1.0, false, false), create_track("B", 1.0, true, false)],
        )];

        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let playlist = PlaylistGenerator::generate(&sources, 1, &mut rng).unwrap();
            assert_eq!(ids(&playlist), vec!["B"]);
        }
    }

    #[test]
    fn test_lone_track_without_repeats_is_used_once() {
        let sources = vec![create_source(
            "1",
            SourceType::Playlist,
            vec![create_track("C", 5.0, false, false)],
        )];

        let mut rng = StdRng::seed_from_u64(3);
        let playlist = PlaylistGenerator::generate(&sources, 3, &mut rng).unwrap();

        assert_eq!(ids(&playlist), vec!["C"]);
    }

    #[test]
    fn test_repeatable_track_fills_every_slot() {
        let sources = vec![create_source(
            "1",
            SourceType::Playlist,
            vec![create_track("D", 0.3, false, true)],
        )];

        let mut rng = StdRng::seed_from_u64(11);
        let playlist = PlaylistGenerator::generate(&sources, 5, &mut rng).unwrap();

        assert_eq!(ids(&playlist), vec!["D"; 5]);
    }

    #[test]
    fn test_every_required_track_appears_exactly_once() {
        let sources = create_mixed_sources();

        for target_size in [0, 1, 3, 8, 20] {
            for seed in 0..100 {
                let mut rng = StdRng::seed_from_u64(seed);
                let playlist =
                    PlaylistGenerator::generate(&sources, target_size, &mut rng).unwrap();
                let counts = occurrences(&playlist);

                for source in &sources {
                    for track in source.musics.iter().filter(|t| t.is_required) {
                        assert_eq!(
                            counts.get(&(source.id.clone(), track.id.clone())),
                            Some(&1),
                            "required track {} missing or repeated \
                             (size {target_size}, seed {seed})",
                            track.id
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_no_repeat_tracks_appear_at_most_once() {
        let sources = create_mixed_sources();

        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            let playlist = PlaylistGenerator::generate(&sources, 30, &mut rng).unwrap();
            let counts = occurrences(&playlist);

            for source in &sources {
                for track in source.musics.iter().filter(|t| !t.allow_repeated) {
                    let count = counts
                        .get(&(source.id.clone(), track.id.clone()))
                        .copied()
                        .unwrap_or(0);
                    assert!(count <= 1, "{} appeared {count} times (seed {seed})", track.id);
                }
            }
        }
    }

    #[test]
    fn test_required_repeatable_track_is_not_drawn_again() {
        let sources = vec![create_source(
            "1",
            SourceType::Album,
            vec![create_track("R", 5.0, true, true), create_track("O", 0.1, false, true)],
        )];

        let mut rng = StdRng::seed_from_u64(5);
        let playlist = PlaylistGenerator::generate(&sources, 6, &mut rng).unwrap();
        let counts = occurrences(&playlist);

        assert_eq!(playlist.len(), 6);
        assert_eq!(counts[&("1".to_string(), "R".to_string())], 1);
        assert_eq!(counts[&("1".to_string(), "O".to_string())], 5);
    }

    #[test]
    fn test_length_matches_target_when_pool_is_large_enough() {
        let sources = create_mixed_sources();

        // 3 required plus 2 repeatable candidates: the pool never empties
        for target_size in [3, 4, 10, 50] {
            let mut rng = StdRng::seed_from_u64(target_size as u64);
            let playlist = PlaylistGenerator::generate(&sources, target_size, &mut rng).unwrap();
            assert_eq!(playlist.len(), target_size);
        }
    }

    #[test]
    fn test_length_when_pool_runs_out() {
        let sources = vec![
            create_source(
                "1",
                SourceType::Album,
                vec![
                    create_track("r1", 1.0, true, false),
                    create_track("n1", 1.0, false, false),
                    create_track("n2", 2.0, false, false),
                ],
            ),
            create_source(
                "2",
                SourceType::Playlist,
                vec![create_track("r2", 1.0, true, false), create_track("n3", 4.0, false, false)],
            ),
        ];

        let mut rng = StdRng::seed_from_u64(42);
        let playlist = PlaylistGenerator::generate(&sources, 10, &mut rng).unwrap();

        // Two required plus each of the three optional tracks once
        assert_eq!(playlist.len(), 5);
        let mut sorted = ids(&playlist);
        sorted.sort();
        assert_eq!(sorted, vec!["n1", "n2", "n3", "r1", "r2"]);
    }

    #[test]
    fn test_required_tracks_may_exceed_target() {
        let sources = vec![create_source(
            "1",
            SourceType::Album,
            vec![
                create_track("r1", 1.0, true, false),
                create_track("r2", 1.0, true, false),
                create_track("r3", 1.0, true, false),
                create_track("n1", 1.0, false, true),
            ],
        )];

        let mut rng = StdRng::seed_from_u64(1);
        let playlist = PlaylistGenerator::generate(&sources, 1, &mut rng).unwrap();

        assert_eq!(playlist.len(), 3);
        assert!(playlist.iter().all(|entry| entry.track.is_required));
    }

    #[test]
    fn test_zero_target_keeps_only_required_tracks() {
        let sources = create_mixed_sources();

        let mut rng = StdRng::seed_from_u64(8);
        let playlist = PlaylistGenerator::generate(&sources, 0, &mut rng).unwrap();

        let mut sorted = ids(&playlist);
        sorted.sort();
        assert_eq!(sorted, vec!["a1", "a5", "p3"]);
    }

    #[test]
    fn test_empty_input_yields_empty_playlist() {
        let mut rng = StdRng::seed_from_u64(0);

        assert!(PlaylistGenerator::generate(&[], 10, &mut rng).unwrap().is_empty());

        let empty_sources = vec![
            create_source("1", SourceType::Album, Vec::new()),
            create_source("2", SourceType::Playlist, Vec::new()),
        ];
        assert!(PlaylistGenerator::generate(&empty_sources, 10, &mut rng).unwrap().is_empty());
    }

    #[test]
    fn test_heavier_weight_is_drawn_proportionally_more() {
        let sources = vec![create_source(
            "1",
            SourceType::Playlist,
            vec![create_track("heavy", 2.0, false, true), create_track("light", 1.0, false, true)],
        )];

        let mut rng = StdRng::seed_from_u64(2024);
        let mut heavy = 0usize;
        let mut light = 0usize;
        for _ in 0..30_000 {
            let playlist = PlaylistGenerator::generate(&sources, 1, &mut rng).unwrap();
            match playlist[0].track.id.as_str() {
                "heavy" => heavy += 1,
                _ => light += 1,
            }
        }

        assert_relative_eq!(heavy as f64 / light as f64, 2.0, max_relative = 0.1);
    }

    #[test]
    fn test_shuffle_spreads_positions_evenly() {
        let sources = vec![create_source(
            "1",
            SourceType::Album,
            vec![
                create_track("x", 1.0, true, false),
                create_track("y", 1.0, true, false),
                create_track("z", 1.0, true, false),
            ],
        )];

        let mut rng = StdRng::seed_from_u64(77);
        let mut first_positions = [0usize; 3];
        for _ in 0..3000 {
            let playlist = PlaylistGenerator::generate(&sources, 3, &mut rng).unwrap();
            let position = playlist
                .iter()
                .position(|entry| entry.track.id == "x")
                .unwrap();
            first_positions[position] += 1;
        }

        for count in first_positions {
            assert_abs_diff_eq!(count as f64, 1000.0, epsilon = 150.0);
        }
    }

    #[test]
    fn test_extreme_draws_pick_from_either_end_of_the_pool() {
        let sources = vec![create_source(
            "1",
            SourceType::Playlist,
            vec![
                create_track("A", 1.0, false, false),
                create_track("B", 1.0, false, false),
                create_track("C", 2.0, false, false),
            ],
        )];

        // Draws at the bottom of the cumulative walk take A, then B
        let playlist = PlaylistGenerator::generate(&sources, 2, &mut StepRng::new(0, 0)).unwrap();
        let mut sorted = ids(&playlist);
        sorted.sort();
        assert_eq!(sorted, vec!["A", "B"]);

        // Draws at the top take C, then B once C has left the pool
        let playlist =
            PlaylistGenerator::generate(&sources, 2, &mut StepRng::new(u64::MAX, 0)).unwrap();
        let mut sorted = ids(&playlist);
        sorted.sort();
        assert_eq!(sorted, vec!["B", "C"]);
    }

    #[test]
    fn test_huge_weights_keep_their_ratio() {
        let sources = vec![create_source(
            "1",
            SourceType::Playlist,
            vec![
                create_track("big", f64::MAX, false, true),
                create_track("half", f64::MAX / 2.0, false, true),
            ],
        )];

        let mut rng = StdRng::seed_from_u64(808);
        let mut big = 0usize;
        let mut half = 0usize;
        for _ in 0..30_000 {
            let playlist = PlaylistGenerator::generate(&sources, 1, &mut rng).unwrap();
            match playlist[0].track.id.as_str() {
                "big" => big += 1,
                _ => half += 1,
            }
        }

        assert_relative_eq!(big as f64 / half as f64, 2.0, max_relative = 0.1);
    }

    #[test]
    fn test_same_seed_gives_same_playlist() {
        let sources = create_mixed_sources();

        let first =
            PlaylistGenerator::generate(&sources, 12, &mut StdRng::seed_from_u64(31)).unwrap();
        let second =
            PlaylistGenerator::generate(&sources, 12, &mut StdRng::seed_from_u64(31)).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_sources_are_not_mutated() {
        let sources = create_mixed_sources();
        let snapshot = sources.clone();

        for seed in 0..20 {
            PlaylistGenerator::generate(&sources, 15, &mut StdRng::seed_from_u64(seed)).unwrap();
        }

        assert_eq!(sources, snapshot);
    }

    #[test]
    fn test_entries_carry_source_provenance() {
        let sources = create_mixed_sources();

        let mut rng = StdRng::seed_from_u64(4);
        let playlist = PlaylistGenerator::generate(&sources, 10, &mut rng).unwrap();

        for entry in &playlist {
            let source = sources
                .iter()
                .find(|source| source.id == entry.source_id)
                .unwrap();
            assert_eq!(entry.source_name, source.name);
            assert_eq!(entry.source_type, source.source_type);
            assert_eq!(source.track(&entry.track.id), Some(&entry.track));
        }
    }

    #[test]
    fn test_same_track_id_in_two_sources_are_distinct_candidates() {
        let sources = vec![
            create_source("1", SourceType::Album, vec![create_track("7", 1.0, false, false)]),
            create_source("2", SourceType::Playlist, vec![create_track("7", 1.0, false, false)]),
        ];

        let mut rng = StdRng::seed_from_u64(9);
        let playlist = PlaylistGenerator::generate(&sources, 5, &mut rng).unwrap();

        assert_eq!(playlist.len(), 2);
        let counts = occurrences(&playlist);
        assert_eq!(counts[&("1".to_string(), "7".to_string())], 1);
        assert_eq!(counts[&("2".to_string(), "7".to_string())], 1);
    }

    #[test]
    fn test_rejects_duplicate_source_ids() {
        let sources = vec![
            create_source("1", SourceType::Album, vec![create_track("a", 1.0, false, false)]),
            create_source("1", SourceType::Playlist, vec![create_track("b", 1.0, false, false)]),
        ];

        let result = PlaylistGenerator::generate(&sources, 2, &mut StdRng::seed_from_u64(0));

        assert!(matches!(result, Err(MixerError::DuplicateSource(ref id)) if id == "1"));
    }

    #[test]
    fn test_rejects_duplicate_track_ids_within_a_source() {
        let sources = vec![create_source(
            "1",
            SourceType::Album,
            vec![create_track("a", 1.0, false, false), create_track("a", 2.0, true, false)],
        )];

        let mut rng = StdRng::seed_from_u64(0);
        let err = PlaylistGenerator::generate(&sources, 2, &mut rng).unwrap_err();

        assert!(err.is_invalid_input());
        assert!(matches!(err, MixerError::DuplicateTrack { ref track_id, .. } if track_id == "a"));
    }

    #[test]
    fn test_rejects_non_positive_weights_before_drawing() {
        for weight in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let sources = vec![create_source(
                "1",
                SourceType::Album,
                vec![
                    create_track("ok", 1.0, false, false),
                    create_track("bad", weight, false, true),
                ],
            )];

            let mut rng = StdRng::seed_from_u64(12);

            let err = PlaylistGenerator::generate(&sources, 3, &mut rng).unwrap_err();
            assert!(err.is_invalid_input());
            assert!(matches!(
                err,
                MixerError::InvalidWeight { ref track_id, .. } if track_id == "bad"
            ));

            // Nothing was drawn from the generator
            assert_eq!(rng.next_u64(), StdRng::seed_from_u64(12).next_u64());
        }
    }

    #[test]
    fn test_required_track_weight_is_not_checked() {
        let sources = vec![create_source(
            "1",
            SourceType::Album,
            vec![create_track("r", 0.0, true, false), create_track("n", 1.0, false, false)],
        )];

        let mut rng = StdRng::seed_from_u64(6);
        let playlist = PlaylistGenerator::generate(&sources, 2, &mut rng).unwrap();

        assert_eq!(playlist.len(), 2);
    }
}
