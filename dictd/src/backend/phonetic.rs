//! Phonetic encodings used as index keys.
//!
//! Two words that sound alike encode to the same key, which is all the
//! index needs; the encoders only look at ASCII letters and ignore
//! everything else.

/// American Soundex code of `word` (letter + three digits), or an empty
/// string when the word contains no ASCII letters.
pub fn soundex(word: &str) -> String {
    fn digit(ch: char) -> u8 {
        match ch {
            'b' | 'f' | 'p' | 'v' => b'1',
            'c' | 'g' | 'j' | 'k' | 'q' | 's' | 'x' | 'z' => b'2',
            'd' | 't' => b'3',
            'l' => b'4',
            'm' | 'n' => b'5',
            'r' => b'6',
            _ => 0,
        }
    }

    let mut letters = word
        .chars()
        .filter(char::is_ascii_alphabetic)
        .map(|ch| ch.to_ascii_lowercase());

    let Some(first) = letters.next() else {
        return String::new();
    };

    let mut code = String::with_capacity(4);
    code.push(first.to_ascii_uppercase());
    let mut previous = digit(first);

    for ch in letters {
        let d = digit(ch);

        if d != 0 && d != previous {
            code.push(d as char);

            if code.len() == 4 {
                break;
            }
        }

        // Vowels separate doubled codes; `h` and `w` do not.
        if d != 0 || matches!(ch, 'a' | 'e' | 'i' | 'o' | 'u' | 'y') {
            previous = d;
        }
    }

    while code.len() < 4 {
        code.push('0');
    }

    code
}

/// Metaphone code of `text`.
///
/// Multi-word input is encoded word by word, codes joined by single
/// spaces, so callers can split the result to get one key per word.
pub fn metaphone(text: &str) -> String {
    text.split_whitespace()
        .map(metaphone_word)
        .filter(|code| !code.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_vowel(ch: char) -> bool {
    matches!(ch, 'A' | 'E' | 'I' | 'O' | 'U')
}

fn metaphone_word(word: &str) -> String {
    let mut w: Vec<char> = word
        .chars()
        .filter(char::is_ascii_alphabetic)
        .map(|ch| ch.to_ascii_uppercase())
        .collect();

    if w.is_empty() {
        return String::new();
    }

    // Initial-letter exceptions.
    match (w.first().copied(), w.get(1).copied()) {
        (Some('A'), Some('E'))
        | (Some('G' | 'K' | 'P'), Some('N'))
        | (Some('W'), Some('R')) => {
            w.remove(0);
        }
        (Some('W'), Some('H')) => {
            w.remove(1);
        }
        (Some('X'), _) => w[0] = 'S',
        _ => {}
    }

    let mut code = String::new();
    let mut i = 0;

    while i < w.len() {
        let ch = w[i];

        // Doubled letters collapse, except C.
        if i > 0 && ch == w[i - 1] && ch != 'C' {
            i += 1;
            continue;
        }

        let next = w.get(i + 1).copied();
        let after = w.get(i + 2).copied();

        match ch {
            'A' | 'E' | 'I' | 'O' | 'U' => {
                // Vowels survive only at the start.
                if i == 0 {
                    code.push(ch);
                }
            }
            'B' => {
                // Silent in terminal -MB, as in "dumb".
                if !(i > 0 && w[i - 1] == 'M' && i + 1 == w.len()) {
                    code.push('B');
                }
            }
            'C' => {
                if next == Some('I') && after == Some('A') {
                    code.push('X');
                } else if next == Some('H') {
                    if i > 0 && w[i - 1] == 'S' {
                        code.push('K');
                    } else {
                        code.push('X');
                    }
                    i += 1;
                } else if matches!(next, Some('E' | 'I' | 'Y')) {
                    code.push('S');
                } else {
                    code.push('K');
                }
            }
            'D' => {
                if next == Some('G') && matches!(after, Some('E' | 'I' | 'Y')) {
                    code.push('J');
                    i += 1;
                } else {
                    code.push('T');
                }
            }
            'G' => {
                if next == Some('H') {
                    // -GH- sounds only before a vowel, as in "ghost";
                    // "night" and friends keep quiet.
                    if after.is_some_and(is_vowel) {
                        code.push('K');
                    }
                    i += 1;
                } else if next == Some('N') {
                    // Silent in -GN-, as in "sign".
                } else if matches!(next, Some('E' | 'I' | 'Y')) {
                    code.push('J');
                } else {
                    code.push('K');
                }
            }
            'H' => {
                // Silent after a vowel with no vowel following.
                if !(i > 0 && is_vowel(w[i - 1]) && !next.is_some_and(is_vowel)) {
                    code.push('H');
                }
            }
            'K' => {
                if !(i > 0 && w[i - 1] == 'C') {
                    code.push('K');
                }
            }
            'P' => {
                if next == Some('H') {
                    code.push('F');
                    i += 1;
                } else {
                    code.push('P');
                }
            }
            'Q' => code.push('K'),
            'S' => {
                if next == Some('H') {
                    code.push('X');
                    i += 1;
                } else if next == Some('I') && matches!(after, Some('A' | 'O')) {
                    code.push('X');
                } else {
                    code.push('S');
                }
            }
            'T' => {
                if next == Some('H') {
                    code.push('0');
                    i += 1;
                } else if next == Some('I') && matches!(after, Some('A' | 'O')) {
                    code.push('X');
                } else {
                    code.push('T');
                }
            }
            'V' => code.push('F'),
            'W' => {
                if next.is_some_and(is_vowel) {
                    code.push('W');
                }
            }
            'X' => code.push_str("KS"),
            'Y' => {
                if next.is_some_and(is_vowel) {
                    code.push('Y');
                }
            }
            'Z' => code.push('S'),
            other => code.push(other),
        }

        i += 1;
    }

    code
}
