//! Anonymous nickname generation

use crate::place::RandomSource;

const ADJECTIVES: [&str; 6] = ["배고픈", "졸린", "신나는", "따뜻한", "용감한", "부지런한"];
const ANIMALS: [&str; 6] = ["수달", "토끼", "고양이", "강아지", "여우", "펭귄"];

/// Nickname like `배고픈 수달#417`
pub fn random_nickname(source: &mut dyn RandomSource) -> String {
    let adjective = ADJECTIVES[source.next_index(ADJECTIVES.len())];
    let animal = ANIMALS[source.next_index(ANIMALS.len())];
    let suffix = 100 + source.next_index(900);
    format!("{} {}#{}", adjective, animal, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::place::picker::RngSource;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_nickname_shape() {
        let mut source = RngSource(StdRng::seed_from_u64(1));
        for _ in 0..100 {
            let nickname = random_nickname(&mut source);
            let (words, suffix) = nickname.split_once('#').unwrap();
            let (adjective, animal) = words.split_once(' ').unwrap();

            assert!(ADJECTIVES.contains(&adjective));
            assert!(ANIMALS.contains(&animal));
            let suffix: u32 = suffix.parse().unwrap();
            assert!((100..=999).contains(&suffix));
        }
    }
}
