//! Latin slugs for Cyrillic names and the status file naming scheme.
//!
//! `"Ньютон Исаак"` becomes `"njuton_isaak"`, or `"njuton_i"` with initials.

use crate::error::{Result, ThesisError};

/// Separator between the teacher and the student part of a status file name.
pub const FILE_SEPARATOR: &str = "__";
pub const STATUS_FILE_EXT: &str = ".json";

fn translit_char(c: char) -> Option<&'static str> {
    let s = match c {
        'а' => "a",
        'б' => "b",
        'в' => "v",
        'г' => "g",
        'д' => "d",
        'е' | 'ё' | 'э' => "e",
        'ж' => "zh",
        'з' => "z",
        'и' => "i",
        'й' => "j",
        'к' => "k",
        'л' => "l",
        'м' => "m",
        'н' => "n",
        'о' => "o",
        'п' => "p",
        'р' => "r",
        'с' => "s",
        'т' => "t",
        'у' => "u",
        'ф' => "f",
        'х' => "h",
        'ц' => "c",
        'ч' => "ch",
        'ш' => "sh",
        'щ' => "sch",
        'ъ' | 'ь' => "",
        'ы' => "y",
        'ю' => "ju",
        'я' => "ja",
        _ => return None,
    };
    Some(s)
}

/// Transliterates a single word to lowercase latin, dropping anything that is
/// not safe in a file name.
fn latin_word(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    for c in word.chars().flat_map(char::to_lowercase) {
        if let Some(latin) = translit_char(c) {
            out.push_str(latin);
        } else if c.is_ascii_alphanumeric() || c == '-' {
            out.push(c);
        }
    }
    out
}

/// Converts `"Surname Name [Patronymic]"` to a lowercase latin slug.
///
/// - `use_initials`: every part after the surname is cut to its first letter
///   and the letters are glued together (`surname_np`).
/// - `one_word`: only the surname is returned.
///
/// Fails with `InvalidInput` for fewer than two words unless `one_word` is set.
pub fn to_latin_slug(name: &str, use_initials: bool, one_word: bool) -> Result<String> {
    let parts: Vec<&str> = name.split_whitespace().collect();
    let Some((surname, rest)) = parts.split_first() else {
        return Err(ThesisError::InvalidInput("Name is empty".to_string()));
    };
    if rest.is_empty() && !one_word {
        return Err(ThesisError::InvalidInput(format!(
            "Name must have at least two words like 'Surname N.': {}",
            name
        )));
    }

    let surname = latin_word(surname);
    if one_word {
        return Ok(surname);
    }

    let tail = if use_initials {
        rest.iter()
            .filter_map(|part| part.chars().next())
            .map(|c| latin_word(&c.to_string()))
            .collect::<String>()
    } else {
        rest.iter()
            .map(|part| latin_word(part))
            .filter(|p| !p.is_empty())
            .collect::<Vec<_>>()
            .join("_")
    };

    if tail.is_empty() {
        Ok(surname)
    } else {
        Ok(format!("{}_{}", surname, tail))
    }
}

fn lenient_slug(name: &str, use_initials: bool) -> Result<String> {
    match to_latin_slug(name, use_initials, false) {
        Err(ThesisError::InvalidInput(_)) => to_latin_slug(name, use_initials, true),
        other => other,
    }
}

/// Base status file name for a student of a teacher, without collision handling:
/// `{teacherSlug}__{studentInitialsSlug}.json`.
pub fn status_file_name(teacher: &str, student: &str) -> Result<String> {
    let teacher_part = lenient_slug(teacher, false)?;
    let student_part = lenient_slug(student, true)?;
    Ok(format!(
        "{}{}{}{}",
        teacher_part, FILE_SEPARATOR, student_part, STATUS_FILE_EXT
    ))
}

/// Picks the first of `name`, `name_2`, `name_3`, ... for which `taken` is false.
pub fn unique_file_name(base: &str, taken: impl Fn(&str) -> bool) -> String {
    if !taken(base) {
        return base.to_string();
    }
    let stem = base.strip_suffix(STATUS_FILE_EXT).unwrap_or(base);
    (2..)
        .map(|n| format!("{}_{}{}", stem, n, STATUS_FILE_EXT))
        .find(|candidate| !taken(candidate))
        .unwrap_or_else(|| base.to_string())
}
