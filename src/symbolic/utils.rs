// the collection of utility functions mainly for bracket parsing and proceeding

/// Finds the rightmost occurrence of any of `operators` at bracket depth
/// zero, returning its byte offset (the offsets are used to slice the input,
/// so they must be byte positions, not char counts).
///
/// Splitting at the rightmost `+`/`-` (or `*`/`/`) keeps the resulting tree
/// left-associative. Two kinds of sign characters are not binary operators
/// and are skipped: the exponent sign of a numeric literal (as in `1e-6`),
/// and a sign in prefix position, i.e. at the start of the input or right
/// after another operator (as in `x^-2` or `2*-3`).
pub fn find_rightmost_operator_outside_brackets(
    input: &str,
    operators: &[char],
) -> Option<(usize, char)> {
    let mut bracket_depth = 0;
    let mut last_op = None;
    let mut prev: Option<char> = None;
    let mut before: Option<char> = None;
    let mut prev_non_ws: Option<char> = None;

    for (i, c) in input.char_indices() {
        match c {
            '(' => bracket_depth += 1,
            ')' => bracket_depth -= 1,
            _ if bracket_depth == 0 && operators.contains(&c) => {
                let is_sign = c == '+' || c == '-';
                if !(is_sign && (is_exponent_sign(prev, before) || is_unary_position(prev_non_ws)))
                {
                    last_op = Some((i, c));
                }
            }
            _ => {}
        }
        before = prev;
        prev = Some(c);
        if !c.is_whitespace() {
            prev_non_ws = Some(c);
        }
    }

    last_op
}

/// Finds the leftmost occurrence of `target` at bracket depth zero,
/// returning its byte offset.
///
/// Used for `^`, which is right-associative: `2^3^2` parses as `2^(3^2)`.
pub fn find_leftmost_operator_outside_brackets(input: &str, target: char) -> Option<usize> {
    let mut bracket_depth = 0;

    for (i, c) in input.char_indices() {
        match c {
            '(' => bracket_depth += 1,
            ')' => bracket_depth -= 1,
            _ if bracket_depth == 0 && c == target => return Some(i),
            _ => {}
        }
    }

    None
}

/// Returns the byte offset of the `)` matching the `(` at byte offset
/// `open_pos`, or None when the brackets are unbalanced.
pub fn find_matching_bracket(input: &str, open_pos: usize) -> Option<usize> {
    let mut stack = 0;

    for (i, c) in input[open_pos..].char_indices() {
        if c == '(' {
            stack += 1;
        } else if c == ')' {
            stack -= 1;
            if stack == 0 {
                return Some(open_pos + i);
            }
        }
    }

    None
}

// A sign char belongs to a literal like "2e-3" when it directly follows an
// 'e'/'E' that itself follows a digit or a decimal point.
fn is_exponent_sign(prev: Option<char>, before: Option<char>) -> bool {
    matches!(prev, Some('e' | 'E'))
        && matches!(before, Some(c) if c.is_ascii_digit() || c == '.')
}

// A sign char is unary when nothing but whitespace precedes it, or the last
// non-whitespace char is itself an operator or an opening bracket.
fn is_unary_position(prev_non_ws: Option<char>) -> bool {
    matches!(prev_non_ws, None | Some('+' | '-' | '*' | '/' | '^' | '('))
}
