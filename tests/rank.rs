extern crate ranked_skiplist;
use ranked_skiplist::*;

extern crate rand;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn seeded<V>(seed: u64) -> SkipListMap<u32, V> {
    SkipListMap::with_config(Config::new().with_seed(seed)).unwrap()
}

#[test]
fn scenario_three_keys() {
    let mut list = seeded(1);
    list.insert(5, "a");
    list.insert(3, "b");
    list.insert(8, "c");

    assert_eq!(list.len(), 3);
    assert_eq!(list.key_at(1), Some(&3));
    assert_eq!(list.key_at(2), Some(&5));
    assert_eq!(list.key_at(3), Some(&8));
    assert_eq!(list.get(&8), Some(&"c"));

    assert_eq!(list.remove(&3), 1);
    assert_eq!(list.len(), 2);
    assert_eq!(list.key_at(1), Some(&5));
}

#[test]
fn delete_on_empty() {
    let mut list: SkipListMap<u32, ()> = seeded(2);
    assert_eq!(list.remove(&1), 0);
    assert_eq!(list.remove_at(1), None);
}

#[test]
fn out_of_range_ranks() {
    let mut list = seeded(3);
    assert!(list.key_at(0).is_none());
    assert!(list.key_at(1).is_none());

    for key in 0..25 {
        list.insert(key, key);
    }

    let length = list.len();
    assert!(list.key_at(0).is_none());
    assert!(list.key_at(length + 1).is_none());
    assert!(list.value_at(0).is_none());
    assert!(list.value_at(length + 1).is_none());
    assert!(list.key_at(usize::max_value()).is_none());
    assert_eq!(list.update_at(length + 1, 7), None);
    assert_eq!(list.len(), length);
}

#[test]
fn update_then_member() {
    let mut list = seeded(4);
    for key in (0..40).rev() {
        list.insert(key, key * 3);
    }
    let keys: Vec<u32> = list.iter().map(|(key, _)| *key).collect();

    for rank in 1..=list.len() {
        assert_eq!(list.update_at(rank, 1000 + rank as u32), Some((rank as u32 - 1) * 3));
        assert_eq!(list.value_at(rank), Some(&(1000 + rank as u32)));
    }

    assert_eq!(list.len(), 40);
    assert_eq!(list.iter().map(|(key, _)| *key).collect::<Vec<u32>>(), keys);
}

#[test]
fn duplicates_take_consecutive_ranks() {
    let mut list = seeded(5);
    list.insert(10, 'x');
    list.insert(20, 'a');
    list.insert(20, 'b');
    list.insert(20, 'c');
    list.insert(30, 'y');

    assert_eq!(list.rank_of(&20), Some(2));
    assert_eq!(list.entry_at(2), Some((&20, &'c')));
    assert_eq!(list.entry_at(3), Some((&20, &'b')));
    assert_eq!(list.entry_at(4), Some((&20, &'a')));
    assert_eq!(list.rank_of(&30), Some(5));
    assert_eq!(list.rank_of(&25), None);
}

#[test]
fn first_and_last() {
    let mut list = seeded(6);
    assert!(list.first().is_none());
    assert!(list.last().is_none());

    for &key in &[7, 3, 11, 5] {
        list.insert(key, ());
    }
    assert_eq!(list.first().map(|(key, _)| *key), Some(3));
    assert_eq!(list.last().map(|(key, _)| *key), Some(11));
}

#[test]
fn ranks_follow_random_workload() {
    let mut rng = StdRng::seed_from_u64(0xdecaf);
    let mut list = seeded(7);
    let mut model: Vec<u32> = Vec::new();

    for _ in 0..3000 {
        let key = rng.gen_range(0..500);
        match rng.gen_range(0..4) {
            0 => {
                let removed = model.iter().filter(|&&other| other == key).count();
                model.retain(|&other| other != key);
                assert_eq!(list.remove(&key), removed);
            }
            1 if !model.is_empty() => {
                let rank = rng.gen_range(1..=model.len());
                let expected = model.remove(rank - 1);
                assert_eq!(list.remove_at(rank).map(|(key, _)| key), Some(expected));
            }
            _ => {
                let at = model.iter().take_while(|&&other| other < key).count();
                model.insert(at, key);
                list.insert(key, key);
            }
        }
    }

    assert_eq!(list.len(), model.len());
    for (index, key) in model.iter().enumerate() {
        assert_eq!(list.key_at(index + 1), Some(key));
    }
    for key in &model {
        let first = model.iter().position(|other| other == key).unwrap();
        assert_eq!(list.rank_of(key), Some(first + 1));
    }
}

#[test]
fn counter_levels_reproduce_layout() {
    let mut list: SkipListMap<u32, u32> = SkipListMap::with_height_control(
        Box::new(CounterGenerator::new(DEFAULT_MAX_HEIGHT)),
        Natural,
        Discard,
    )
    .unwrap();

    for key in 0..1024 {
        list.insert(key, key);
    }

    // The 1024th insertion is the first to reach height 11.
    assert_eq!(list.height(), 11);
    for rank in (1..=1024).step_by(97) {
        assert_eq!(list.key_at(rank), Some(&(rank as u32 - 1)));
    }
}

#[test]
fn single_level_list_still_ranks() {
    let mut list: SkipListMap<u32, u32> =
        SkipListMap::with_config(Config::new().with_max_height(1)).unwrap();
    for key in (0..100).rev() {
        list.insert(key, key);
    }
    assert_eq!(list.height(), 1);
    assert_eq!(list.key_at(50), Some(&49));
    assert_eq!(list.remove_at(50), Some((49, 49)));
    assert_eq!(list.rank_of(&50), Some(50));
}

#[test]
fn reversed_comparator() {
    let mut list: SkipListMap<u32, u32, _> = SkipListMap::with_comparator(|lhs: &u32, rhs: &u32| rhs.cmp(lhs));
    for key in 1..=5 {
        list.insert(key, key * 10);
    }
    assert_eq!(list.key_at(1), Some(&5));
    assert_eq!(list.value_at(5), Some(&10));
    assert_eq!(list.remove(&3), 1);
    assert_eq!(list.key_at(3), Some(&2));
}
