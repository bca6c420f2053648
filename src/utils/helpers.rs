/// Spreadsheet-style letter for a zero-based column index: 0 -> A, 25 -> Z, 26 -> AA.
#[must_use]
pub fn column_letter(index: usize) -> String {
    let mut col_name = String::new();
    let mut n = index + 1;

    while n > 0 {
        let remainder = (n - 1) % 26;
        col_name.insert(0, (b'A' + remainder as u8) as char);
        n = (n - 1) / 26;
    }

    col_name
}

/// Zero-based index of a column letter such as "AA"; case-insensitive.
#[must_use]
pub fn column_letter_to_index(name: &str) -> Option<usize> {
    if name.is_empty() {
        return None;
    }

    let mut result: usize = 0;

    for c in name.chars() {
        if !c.is_ascii_alphabetic() {
            return None;
        }

        let val = (c.to_ascii_uppercase() as u8 - b'A' + 1) as usize;
        result = result.checked_mul(26)?.checked_add(val)?;
    }

    Some(result - 1)
}

/// Parses a column given either as letters ("C") or as a 1-based number ("3").
#[must_use]
pub fn parse_column(input: &str) -> Option<usize> {
    let input = input.trim();

    if let Ok(number) = input.parse::<usize>() {
        return number.checked_sub(1);
    }

    column_letter_to_index(input)
}

/// Header text for display, falling back to the column letter when blank.
#[must_use]
pub fn display_name(header: &str, index: usize) -> String {
    let trimmed = header.trim();

    if trimmed.is_empty() {
        column_letter(index)
    } else {
        trimmed.to_string()
    }
}

// Truncate to a terminal width, counting non-ASCII characters as two columns
#[must_use]
pub fn truncate_to_width(content: &str, width: usize) -> String {
    let display_width = content
        .chars()
        .fold(0, |acc, c| acc + if c.is_ascii() { 1 } else { 2 });

    if display_width <= width {
        return content.to_string();
    }

    let mut result = String::with_capacity(width);
    let mut current_width = 0;

    for c in content.chars() {
        let char_width = if c.is_ascii() { 1 } else { 2 };
        if current_width + char_width < width {
            result.push(c);
            current_width += char_width;
        } else {
            break;
        }
    }

    result.push('…');
    result
}
