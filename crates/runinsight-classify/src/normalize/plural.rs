//! Spanish plural reduction.
//!
//! A small suffix stripper in the spirit of a stemmer, limited to plural
//! endings so that keyword lists and questions meet on the same form.
//! Every rewritten word ends in a vowel or `z`, so applying the reduction
//! twice gives the same result as applying it once.

const VOWELS: &[char] = &['a', 'e', 'i', 'o', 'u', 'á', 'é', 'í', 'ó', 'ú'];

/// Words this short are left alone (`mes`, `más`, `tres`).
const MIN_CHARS: usize = 5;

/// Reduce a lowercase word to its singular form.
pub fn singularize(word: &str) -> String {
    let chars: Vec<char> = word.chars().collect();
    let n = chars.len();
    if n < MIN_CHARS {
        return word.to_string();
    }

    // veces -> vez, nueces -> nuez
    if chars[n - 3..] == ['c', 'e', 's'] && VOWELS.contains(&chars[n - 4]) {
        let mut stem: String = chars[..n - 3].iter().collect();
        stem.push('z');
        return stem;
    }

    // ejercicios -> ejercicio, series -> serie
    if chars[n - 1] == 's' && VOWELS.contains(&chars[n - 2]) {
        return chars[..n - 1].iter().collect();
    }

    word.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_singularize() {
        assert_eq!(singularize("ejercicios"), "ejercicio");
        assert_eq!(singularize("zapatillas"), "zapatilla");
        assert_eq!(singularize("lesiones"), "lesione");
        assert_eq!(singularize("nueces"), "nuez");
        assert_eq!(singularize("dulces"), "dulce");
        assert_eq!(singularize("estás"), "está");
        // Too short, or no vowel before the s
        assert_eq!(singularize("más"), "más");
        assert_eq!(singularize("reps"), "reps");
        assert_eq!(singularize("correr"), "correr");
    }

    #[test]
    fn test_singularize_is_stable() {
        for word in ["proteínas", "veces", "series", "calcetines", "bcaa", "pilates"] {
            let once = singularize(word);
            assert_eq!(singularize(&once), once, "unstable for {word}");
        }
    }
}
