/// Minimal signed rotation from `current` for a requested step.
///
/// Finite rings clamp to the first and last item. Infinite rings pick the
/// shorter direction around the ring; on a tie the forward direction wins.
/// `length` must be non-zero.
pub fn shortest_delta(current: usize, length: usize, requested: i64, infinite: bool) -> i64 {
    let current = current as i64;
    let length = length as i64;

    if !infinite {
        return requested.clamp(-current, length - 1 - current);
    }

    let next = (length + (current + requested % length)) % length;
    let reverse = if current > next {
        current - next
    } else {
        current + length - next
    };
    let right = length - reverse;

    if reverse < right { -reverse } else { right }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn distance(from: i64, to: i64, length: i64) -> i64 {
        let forward = (to - from).rem_euclid(length);
        forward.min(length - forward)
    }

    #[test]
    fn test_finite_clamps_to_edges() {
        assert_eq!(shortest_delta(2, 5, 10, false), 2);
        assert_eq!(shortest_delta(2, 5, -10, false), -2);
        assert_eq!(shortest_delta(0, 5, -1, false), 0);
        assert_eq!(shortest_delta(4, 5, 1, false), 0);
        assert_eq!(shortest_delta(1, 5, 1, false), 1);
    }

    #[test]
    fn test_infinite_wraps_backwards() {
        assert_eq!(shortest_delta(0, 5, -1, true), -1);
        assert_eq!(shortest_delta(4, 5, 1, true), 1);
        assert_eq!(shortest_delta(0, 5, 4, true), -1);
    }

    #[test]
    fn test_infinite_tie_goes_forward() {
        assert_eq!(shortest_delta(0, 4, 2, true), 2);
        assert_eq!(shortest_delta(0, 4, -2, true), 2);
        assert_eq!(shortest_delta(3, 6, 3, true), 3);
    }

    #[test]
    fn test_no_movement_is_zero() {
        assert_eq!(shortest_delta(3, 5, 0, true), 0);
        assert_eq!(shortest_delta(3, 5, 10, true), 0);
        assert_eq!(shortest_delta(0, 1, 1, true), 0);
        assert_eq!(shortest_delta(0, 1, -7, false), 0);
    }

    #[test]
    fn test_result_reaches_target_by_shortest_path() {
        for length in 1..=9_i64 {
            for current in 0..length {
                for requested in -25..=25_i64 {
                    let result = shortest_delta(current as usize, length as usize, requested, true);
                    let target = (current + requested).rem_euclid(length);
                    assert_eq!((current + result).rem_euclid(length), target);
                    assert!(result.abs() <= length);
                    assert_eq!(result.abs(), distance(current, target, length));
                }
            }
        }
    }

    #[test]
    fn test_finite_never_leaves_range() {
        for length in 1..=9_i64 {
            for current in 0..length {
                for requested in [-1000, -length, -1, 0, 1, length, 1000] {
                    let result =
                        shortest_delta(current as usize, length as usize, requested, false);
                    let landed = current + result;
                    assert!((0..length).contains(&landed));
                }
            }
        }
    }
}
