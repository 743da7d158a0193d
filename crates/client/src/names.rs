//! Random channel-name generation.
//!
//! New channels get a two-word `adjective-animal` name, e.g. `brave-otter`.

use rand::seq::SliceRandom;

const ADJECTIVES: &[&str] = &[
    "amber", "bold", "brave", "bright", "calm", "clever", "cosmic", "crimson",
    "curious", "daring", "dusty", "eager", "early", "fancy", "fierce", "fuzzy",
    "gentle", "giant", "golden", "happy", "hidden", "humble", "icy", "jolly",
    "keen", "lively", "lucky", "mellow", "merry", "misty", "noble", "odd",
    "proud", "quick", "quiet", "rapid", "rustic", "shiny", "silent", "sleepy",
    "snowy", "spry", "sturdy", "sunny", "swift", "tiny", "wild", "witty",
];

const ANIMALS: &[&str] = &[
    "badger", "bat", "bear", "beaver", "bison", "crane", "crow", "deer",
    "dingo", "dove", "eagle", "falcon", "ferret", "finch", "fox", "gecko",
    "hare", "hawk", "hedgehog", "heron", "ibis", "jackal", "koala", "lemur",
    "llama", "lynx", "marmot", "mole", "moose", "newt", "otter", "owl",
    "panda", "puffin", "quail", "rabbit", "raven", "robin", "seal", "shrew",
    "sparrow", "stoat", "swan", "toad", "vole", "walrus", "weasel", "wren",
];

/// Pick a fresh `adjective-animal` pair.
pub fn channel_name() -> String {
    let mut rng = rand::thread_rng();
    let adjective = ADJECTIVES.choose(&mut rng).copied().unwrap_or("new");
    let animal = ANIMALS.choose(&mut rng).copied().unwrap_or("channel");
    format!("{adjective}-{animal}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_two_dictionary_words() {
        for _ in 0..64 {
            let name = channel_name();
            let mut parts = name.split('-');
            let adjective = parts.next().unwrap();
            let animal = parts.next().unwrap();
            assert!(parts.next().is_none(), "unexpected extra segment in {name}");
            assert!(ADJECTIVES.contains(&adjective));
            assert!(ANIMALS.contains(&animal));
        }
    }
}
