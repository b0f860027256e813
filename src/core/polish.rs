//! Evaluator for expressions in postfix (reverse polish) notation.
//!
//! Supported tokens:
//!
//! - **Arithmetic**: `+`, `-`, `*`, `/`
//! - **Functions**: `sin`, `cos`, `ln`, `exp`, `sqrt`
//! - **Constants**: plain numbers (`2`, `0.5`)
//! - **Variables**: `$<index>`, a zero-based index into the variables slice
//!
//! # Examples
//!
//! ```
//! use evonet::core::polish;
//!
//! let result = polish::evaluate("2 $0 / 3 $1 * +", &[3.0, 4.0]).unwrap();
//! assert!((result - (2.0 / 3.0 + 3.0 * 4.0)).abs() < 1e-12);
//! ```

/// Evaluates an expression written in postfix polish notation.
///
/// Returns `Err` when the expression uses an unsupported function, refers
/// to a variable outside of `variables`, contains a malformed constant, or
/// does not reduce to exactly one value.
pub fn evaluate(expression: &str, variables: &[f64]) -> Result<f64, String> {
    let mut stack: Vec<f64> = Vec::new();

    for token in expression.split_whitespace() {
        let first = token
            .chars()
            .next()
            .expect("split_whitespace yields non-empty tokens");

        if first.is_ascii_digit() {
            // numeric constant
            let value: f64 = token
                .parse()
                .map_err(|_| format!("malformed constant: {token}"))?;
            stack.push(value);
        } else if first == '$' {
            // variable reference
            let index: usize = token[1..]
                .parse()
                .map_err(|_| format!("malformed variable: {token}"))?;
            let value = *variables
                .get(index)
                .ok_or_else(|| format!("variable out of bounds: {token}"))?;
            stack.push(value);
        } else {
            // every function takes at least one argument
            let v = stack
                .pop()
                .ok_or_else(|| "incorrect expression".to_string())?;

            let result = match token {
                "+" => pop(&mut stack)? + v,
                "-" => pop(&mut stack)? - v,
                "*" => pop(&mut stack)? * v,
                "/" => pop(&mut stack)? / v,
                "sin" => v.sin(),
                "cos" => v.cos(),
                "ln" => v.ln(),
                "exp" => v.exp(),
                "sqrt" => v.sqrt(),
                _ => return Err(format!("unsupported function: {token}")),
            };
            stack.push(result);
        }
    }

    if stack.len() != 1 {
        return Err("incorrect expression".to_string());
    }
    Ok(stack.pop().expect("stack holds exactly one value"))
}

fn pop(stack: &mut Vec<f64>) -> Result<f64, String> {
    stack.pop().ok_or_else(|| "incorrect expression".to_string())
}

// ============================================================================
// Tests
// ============================================================================
