use env_logger::Env;
use log::info;

use ranked_skiplist::{Config, SkipListMap};

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("debug")).init();

    let config = Config::new().with_max_height(16).with_seed(432112);
    let mut list: SkipListMap<u32, u32> = match SkipListMap::with_config(config) {
        Ok(list) => list,
        Err(error) => {
            eprintln!("{}", error);
            std::process::exit(1);
        }
    };

    let mut k = 50;
    while k > 0 {
        list.insert(k, k * k);
        k -= 1;
    }
    println!("{}", list);
    info!("{} elements over {} levels", list.len(), list.height());

    let k: u32 = 3;
    println!("{:?}", list.get(&k));
    println!("{:?}", list.rank_of(&k));
    println!("{:?}", list.remove(&k));
    println!("{:?}", list.get(&k));

    for rank in &[1, 25, list.len(), list.len() + 1] {
        println!("#{} -> {:?}", rank, list.entry_at(*rank));
    }

    list.update_at(1, 0);
    println!("{}", list);
}
