use rand::Rng;
use slug::slugify;

/// Fills an empty slug from the given source string. A slug the caller
/// already set is returned untouched. The storage path must call this
/// right before every insert/update.
pub fn ensure_slug(current: &str, source: &str) -> String {
    if current.trim().is_empty() {
        slugify(source)
    } else {
        current.to_string()
    }
}

/// Recipe slugs derive from the title alone.
pub fn ensure_recipe_slug(current: &str, titre: &str) -> String {
    ensure_slug(current, titre)
}

/// User slugs carry a random salt so two accounts with the same name
/// do not collide. Not reproducible across calls by design.
pub fn ensure_user_slug(current: &str, first_name: &str, last_name: &str) -> String {
    let salt: u32 = rand::thread_rng().gen();
    ensure_slug(current, &format!("{} {} {}", first_name, last_name, salt))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recipe_slug_is_lowercase_hyphenated_and_accent_stripped() {
        assert_eq!(
            ensure_recipe_slug("", "Tarte aux Pommes!"),
            "tarte-aux-pommes"
        );
        assert_eq!(ensure_recipe_slug("", "Crème Brûlée"), "creme-brulee");
    }

    #[test]
    fn preset_slug_is_never_overwritten() {
        assert_eq!(
            ensure_recipe_slug("my-custom-slug", "Tarte aux Pommes!"),
            "my-custom-slug"
        );
        assert_eq!(
            ensure_user_slug("ada-the-first", "Ada", "Lovelace"),
            "ada-the-first"
        );
    }

    #[test]
    fn user_slug_is_salted_and_does_not_collide() {
        let a = ensure_user_slug("", "Ada", "Lovelace");
        let b = ensure_user_slug("", "Ada", "Lovelace");
        assert!(a.starts_with("ada-lovelace-"));
        assert!(b.starts_with("ada-lovelace-"));
        assert_ne!(a, b);
    }

    #[test]
    fn whitespace_only_slug_counts_as_empty() {
        assert_eq!(ensure_recipe_slug("   ", "Pot au Feu"), "pot-au-feu");
    }
}
