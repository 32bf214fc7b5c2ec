//! Parameterized `SET`-clause assembly for partial updates.
//!
//! Partial-update endpoints only write the fields the caller supplied. This
//! builder emits `column = $n` fragments over `sqlx::QueryBuilder`, so values
//! are always bound parameters. Column names come from code constants only,
//! never from request input.

use sqlx::{Postgres, QueryBuilder};

/// Builds an `UPDATE <table> SET ...` statement from optional fields.
pub struct PatchBuilder<'args> {
    builder: QueryBuilder<'args, Postgres>,
    fields: usize,
}

impl<'args> PatchBuilder<'args> {
    /// Start a patch statement for the given table.
    pub fn new(table: &str) -> Self {
        Self {
            builder: QueryBuilder::new(format!("UPDATE {table} SET ")),
            fields: 0,
        }
    }

    /// Append a `column = <bound value>` fragment.
    pub fn set<T>(&mut self, column: &str, value: T) -> &mut Self
    where
        T: 'args + sqlx::Encode<'args, Postgres> + sqlx::Type<Postgres> + Send,
    {
        self.separator();
        self.builder.push(column);
        self.builder.push(" = ");
        self.builder.push_bind(value);
        self
    }

    /// Append a raw SQL fragment such as `updated_at = NOW()` or
    /// `terms_version = terms_version + 1`. The fragment must be a constant.
    pub fn set_raw(&mut self, fragment: &str) -> &mut Self {
        self.separator();
        self.builder.push(fragment);
        self
    }

    /// Whether any field has been added.
    pub fn is_empty(&self) -> bool {
        self.fields == 0
    }

    /// Number of fields set so far.
    pub fn field_count(&self) -> usize {
        self.fields
    }

    /// Finish with a `WHERE id = <bound>` clause and return the builder
    /// for execution.
    pub fn finish_where_id(
        mut self,
        id: uuid::Uuid,
        returning: Option<&str>,
    ) -> QueryBuilder<'args, Postgres> {
        self.builder.push(" WHERE id = ");
        self.builder.push_bind(id);
        if let Some(cols) = returning {
            self.builder.push(" RETURNING ");
            self.builder.push(cols);
        }
        self.builder
    }

    fn separator(&mut self) {
        if self.fields > 0 {
            self.builder.push(", ");
        }
        self.fields += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emits_parameterized_fragments() {
        let mut patch = PatchBuilder::new("collaborations");
        patch.set("discount_percentage", 20i32);
        patch.set_raw("updated_at = NOW()");
        patch.set("why_great_fit", "because");
        let builder = patch.finish_where_id(uuid::Uuid::nil(), Some("*"));

        assert_eq!(
            builder.sql(),
            "UPDATE collaborations SET discount_percentage = $1, updated_at = NOW(), \
             why_great_fit = $2 WHERE id = $3 RETURNING *"
        );
    }

    #[test]
    fn test_empty_patch_detected() {
        let patch = PatchBuilder::new("users");
        assert!(patch.is_empty());
    }
}
