//! Unit tests for park-terrain.

#[cfg(test)]
mod construction {
    use crate::{Terrain, TerrainError};
    use park_core::Point;

    #[test]
    fn from_size_walls_the_border() {
        let t = Terrain::from_size(5, 4).unwrap();
        assert!(t.is_obstacle_cell(0, 0));
        assert!(t.is_obstacle_cell(4, 2));
        assert!(t.is_obstacle_cell(2, 3));
        assert!(!t.is_obstacle_cell(1, 1));
        assert_eq!(t.free_interior_cells(), 3 * 2);
    }

    #[test]
    fn from_size_rejects_tiny_maps() {
        assert_eq!(
            Terrain::from_size(2, 10),
            Err(TerrainError::TooSmall { width: 2, height: 10 })
        );
    }

    #[test]
    fn default_spawns_and_exits() {
        let t = Terrain::from_size(100, 70).unwrap();
        assert_eq!(t.spawn_points(), &[Point::new(1.0, 35.0), Point::new(98.0, 23.0)]);
        assert_eq!(t.exit_points(), &[Point::new(98.0, 68.0), Point::new(2.0, 2.0)]);
        assert!(t.spawn_points().iter().all(|&p| t.is_free(p)));
        assert!(t.exit_points().iter().all(|&p| t.is_free(p)));
    }

    #[test]
    fn from_grid_accepts_binary_rows() {
        let t = Terrain::from_grid(vec![
            vec![1, 1, 1, 1],
            vec![1, 0, 1, 1],
            vec![1, 0, 0, 1],
            vec![1, 1, 1, 1],
        ])
        .unwrap();
        assert_eq!((t.width(), t.height()), (4, 4));
        assert_eq!(t.free_interior_cells(), 3);
        assert!(t.is_obstacle_cell(2, 1));
    }

    #[test]
    fn from_grid_rejects_malformed_input() {
        let ragged = vec![vec![1, 1, 1], vec![1, 0], vec![1, 1, 1]];
        let bad_value = vec![vec![1, 1, 1], vec![1, 7, 1], vec![1, 1, 1]];
        let tiny = vec![vec![0, 0], vec![0, 0]];
        for rows in [ragged, bad_value, tiny, Vec::new()] {
            assert!(matches!(
                Terrain::from_grid(rows),
                Err(TerrainError::MalformedGrid(_))
            ));
        }
    }

    #[test]
    fn point_lists_must_be_non_empty() {
        let t = Terrain::from_size(10, 10).unwrap();
        assert_eq!(
            t.clone().with_spawns(Vec::new()),
            Err(TerrainError::EmptyPointList("spawn"))
        );
        let t = t.with_exits(vec![Point::new(5.0, 5.0)]).unwrap();
        assert_eq!(t.exit_points(), &[Point::new(5.0, 5.0)]);
    }
}

#[cfg(test)]
mod queries {
    use crate::Terrain;
    use park_core::{BBox, Point};

    #[test]
    fn is_free_rounds_to_cells() {
        let t = Terrain::from_size(10, 10).unwrap();
        assert!(t.is_free(Point::new(1.4, 1.4)));
        assert!(!t.is_free(Point::new(0.4, 5.0)));
        assert!(!t.is_free(Point::new(-3.0, 5.0)));
        assert!(!t.is_free(Point::new(5.0, 42.0)));
    }

    #[test]
    fn free_line_blocked_by_barrier() {
        let mut t = Terrain::from_size(12, 12).unwrap();
        t.stamp_barrier(BBox::new(5, 3, 2, 6));
        assert!(!t.is_free_line(Point::new(2.0, 5.0), Point::new(9.0, 5.0)));
        assert!(t.is_free_line(Point::new(2.0, 10.0), Point::new(9.0, 10.0)));
    }

    #[test]
    fn near_is_inflated_containment() {
        let t = Terrain::from_size(20, 20).unwrap();
        let bbox = BBox::new(5, 5, 3, 2);
        assert!(t.near(Point::new(6.0, 8.0), bbox, 1.2));
        assert!(!t.near(Point::new(6.0, 9.5), bbox, 1.2));
    }

    #[test]
    fn stamp_barrier_clamps_and_updates_count() {
        let mut t = Terrain::from_size(6, 6).unwrap();
        assert_eq!(t.free_interior_cells(), 16);
        t.stamp_barrier(BBox::new(3, 3, 10, 10));
        // Cells (3..5, 3..5) are interior; the rest is border or out of range.
        assert_eq!(t.free_interior_cells(), 12);
        t.stamp_barrier(BBox::new(3, 3, 1, 1));
        assert_eq!(t.free_interior_cells(), 12);
    }

    #[test]
    fn stamp_barrier_tolerates_extreme_coordinates() {
        let mut t = Terrain::from_size(6, 6).unwrap();
        t.stamp_barrier(BBox::new(i32::MAX - 1, 2, 4, 3));
        t.stamp_barrier(BBox::new(2, i32::MAX, 1, i32::MAX));
        assert_eq!(t.free_interior_cells(), 16);
        t.stamp_barrier(BBox::new(i32::MIN, 1, i32::MAX, 1));
        assert_eq!(t.free_interior_cells(), 16);
    }

    #[test]
    fn open_cell_frees_border_without_touching_interior_count() {
        let mut t = Terrain::from_size(6, 6).unwrap();
        t.open_cell(0, 3);
        assert!(t.is_free(Point::new(0.0, 3.0)));
        assert_eq!(t.free_interior_cells(), 16);
        t.open_cell(99, 99);
    }
}

#[cfg(test)]
mod sampling {
    use crate::{Terrain, TerrainError};
    use park_core::{BBox, ParkRng};

    #[test]
    fn random_free_point_lands_on_free_interior() {
        let mut t = Terrain::from_size(10, 10).unwrap();
        t.stamp_barrier(BBox::new(1, 1, 8, 7));
        let mut rng = ParkRng::new(11);
        for _ in 0..50 {
            let p = t.random_free_point(rng.inner()).unwrap();
            assert!(t.is_free(p));
            assert_eq!(p.y, 8.0);
        }
    }

    #[test]
    fn fully_blocked_interior_is_an_error() {
        let mut t = Terrain::from_size(8, 8).unwrap();
        t.stamp_barrier(BBox::new(0, 0, 8, 8));
        let mut rng = ParkRng::new(1);
        assert_eq!(t.random_free_point(rng.inner()), Err(TerrainError::NoFreeCell));
    }
}
