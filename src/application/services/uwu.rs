//! Whimsical text transform for the `uwu` command

fn is_vowel(c: char) -> bool {
    matches!(c.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u')
}

/// Uwu-ify text: `r`/`l` become `w`, `n` before a vowel becomes `ny`,
/// `ove` becomes `uv`, and the result ends with ` uwu`.
pub fn uwuify(text: &str) -> String {
    let chars: Vec<char> = text.trim().chars().collect();
    let mut out = String::with_capacity(text.len() + 4);

    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        let next = chars.get(i + 1).copied();

        if let ('o' | 'O', Some(v @ ('v' | 'V')), Some('e' | 'E')) = (c, next, chars.get(i + 2).copied()) {
            out.push(if c == 'O' { 'U' } else { 'u' });
            out.push(v);
            i += 3;
            continue;
        }

        match c {
            'r' | 'l' => out.push('w'),
            'R' | 'L' => out.push('W'),
            'n' | 'N' if next.is_some_and(is_vowel) => {
                out.push(c);
                out.push(if c == 'N' && next.is_some_and(|n| n.is_uppercase()) { 'Y' } else { 'y' });
            }
            _ => out.push(c),
        }
        i += 1;
    }

    out.push_str(" uwu");
    out
}
