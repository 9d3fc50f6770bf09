use clap::Parser;
use clap::ValueEnum;
use hashbrown::HashSet;
use intmap::IntMap;

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Pattern {
    /// 0, 1, 2, ...
    Sequential,
    /// Multiples of the stride, wrapping at 2^32.
    Strided,
    /// Keys produced by a multiplicative congruential generator.
    Scattered,
}

#[derive(Parser, Debug)]
struct Args {
    #[arg(short = 'n', long = "keys", default_value_t = 100_000)]
    keys: u32,

    #[arg(short = 'p', long = "pattern", value_enum, default_value_t = Pattern::Sequential)]
    pattern: Pattern,

    #[arg(short = 's', long = "stride", default_value_t = 256)]
    stride: u32,

    #[arg(short = 'l', long = "load_factor", default_value_t = 0.75)]
    load_factor: f64,

    /// Delete every other key after filling the table.
    #[arg(short = 'd', long = "delete_half")]
    delete_half: bool,
}

fn key_for(args: &Args, i: u32) -> u32 {
    match args.pattern {
        Pattern::Sequential => i,
        Pattern::Strided => i.wrapping_mul(args.stride),
        Pattern::Scattered => i.wrapping_mul(2_654_435_761).wrapping_add(0x9e37_79b9),
    }
}

/// Generates the requested keys in order, dropping repeats produced by
/// patterns that wrap around the key space.
fn distinct_keys(args: &Args) -> Vec<u32> {
    let mut seen = HashSet::new();
    (0..args.keys)
        .map(|i| key_for(args, i))
        .filter(|&key| seen.insert(key))
        .collect()
}

fn fill(args: &Args, keys: &[u32]) -> IntMap<u32> {
    let mut map = IntMap::with_capacity_and_load_factor(0, args.load_factor);
    for (i, &key) in keys.iter().enumerate() {
        map.insert(key, i as u32);
    }
    assert_eq!(map.len(), keys.len(), "every distinct key must be stored");
    map
}

/// Deletes every other key, returning the keys that remain.
fn delete_half(map: &mut IntMap<u32>, keys: &[u32]) -> intmap::Result<Vec<u32>> {
    let mut remaining = Vec::with_capacity(keys.len() / 2);
    for (i, &key) in keys.iter().enumerate() {
        if i % 2 == 0 {
            map.delete(key)?;
        } else {
            remaining.push(key);
        }
    }
    Ok(remaining)
}

fn main() {
    let args = Args::parse();

    println!(
        "Filling IntMap with {} {:?} keys (load factor {})",
        args.keys, args.pattern, args.load_factor
    );

    let mut keys = distinct_keys(&args);
    if keys.len() < args.keys as usize {
        println!(
            "Pattern wrapped around the key space: {} of {} keys are distinct",
            keys.len(),
            args.keys
        );
    }

    let mut map = fill(&args, &keys);

    println!("Inserted {} keys into {} slots", map.len(), map.size());
    println!(
        "Final load factor: {:.2}%",
        (map.len() as f64 / map.size() as f64) * 100.0
    );

    let stats = map.stats();
    println!(
        "Resizes: {}, finds: {}, steps: {}, average steps per find: {:.2}",
        stats.resizes,
        stats.finds,
        stats.steps,
        stats.average_steps()
    );

    if args.delete_half {
        map.reset_stats();
        keys = match delete_half(&mut map, &keys) {
            Ok(remaining) => remaining,
            Err(err) => {
                eprintln!("delete pass failed: {err}");
                std::process::exit(1);
            }
        };
        println!("Deleted every other key, {} keys remain", map.len());
    }

    map.reset_stats();
    let misses = keys.iter().filter(|&&key| map.search(key).is_err()).count();
    println!(
        "Lookup pass: {} misses, average steps per find: {:.2}",
        misses,
        map.stats().average_steps()
    );

    map.probe_histogram().print();
}
