//! Recursive-descent parser for `CREATE TABLE` statements.
//!
//! One invocation per statement. Clause lines that match no recognized
//! pattern are skipped, never fatal: the parser returns a `Table` with
//! whatever fields did parse.

use super::lexer::{Lexer, Token};
use crate::model::{Field, FieldRef, Relation, Table};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DdlError {
    #[error("empty DDL statement")]
    Empty,
    #[error("not a CREATE TABLE statement: found {0:?}")]
    NotCreateTable(Token),
}

/// Parse one `SHOW CREATE TABLE` statement.
///
/// `table_name` is the name the schema source reported for the statement and
/// is canonical; the name declared inside the DDL text is not consulted.
/// Returns the parsed table together with the foreign-key relations its
/// clauses declare, in declaration order.
pub fn parse_create_table(
    table_name: &str,
    ddl: &str,
) -> Result<(Table, Vec<Relation>), DdlError> {
    let tokens = Lexer::new(ddl).tokenize();
    let mut parser = Parser::new(tokens);
    parser.parse(table_name)
}

/// One `FOREIGN KEY (col) REFERENCES table (col)` pairing.
struct FkClause {
    column: String,
    target: String,
    target_field: String,
}

struct RawField {
    name: String,
    typ: String,
    primary_attr: bool,
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    fn current(&self) -> &Token {
        self.tokens.get(self.pos).unwrap_or(&Token::Eof)
    }

    fn advance(&mut self) {
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
    }

    fn parse(&mut self, table_name: &str) -> Result<(Table, Vec<Relation>), DdlError> {
        if self.current() == &Token::Eof {
            return Err(DdlError::Empty);
        }
        if self.current() != &Token::Create {
            return Err(DdlError::NotCreateTable(self.current().clone()));
        }
        self.advance();
        if self.current() != &Token::Table {
            return Err(DdlError::NotCreateTable(self.current().clone()));
        }
        self.advance();

        // IF NOT EXISTS
        if self.current() == &Token::If {
            self.advance();
            if self.current() == &Token::Not {
                self.advance();
            }
            if self.current() == &Token::Exists {
                self.advance();
            }
        }

        // Declared name, possibly db.table; the caller-supplied name wins
        if let Token::Ident(_) = self.current() {
            self.advance();
            if self.current() == &Token::Dot {
                self.advance();
                if let Token::Ident(_) = self.current() {
                    self.advance();
                }
            }
        }

        if self.current() != &Token::LParen {
            // No column block: a valid table with zero fields
            return Ok((
                Table {
                    name: table_name.to_string(),
                    fields: vec![],
                },
                vec![],
            ));
        }
        self.advance();

        let mut raw_fields: Vec<RawField> = Vec::new();
        let mut pk_columns: Vec<String> = Vec::new();
        let mut fks: Vec<FkClause> = Vec::new();

        loop {
            match self.current() {
                Token::RParen | Token::Eof => break,
                Token::Comma => {
                    self.advance();
                }
                Token::Primary => {
                    // PRIMARY KEY (col1, col2, ...)
                    self.advance();
                    if self.current() == &Token::Key {
                        self.advance();
                        pk_columns.extend(self.parse_column_list());
                    }
                    self.skip_clause_tail();
                }
                Token::Foreign => {
                    if let Some(clauses) = self.parse_foreign_key() {
                        fks.extend(clauses);
                    }
                    self.skip_clause_tail();
                }
                Token::Constraint => {
                    // CONSTRAINT `name` ... - the following keyword decides;
                    // the clause itself never becomes a field
                    self.advance();
                    if let Token::Ident(_) = self.current() {
                        self.advance();
                    }
                }
                Token::Unique => {
                    // UNIQUE [KEY|INDEX] `name` (cols)
                    self.advance();
                    if matches!(self.current(), Token::Key | Token::Index) {
                        self.advance();
                    }
                    self.skip_clause_tail();
                }
                Token::Key | Token::Index => {
                    // KEY `name` (cols) USING BTREE
                    self.skip_clause_tail();
                }
                Token::Ident(_) => {
                    if let Some(raw) = self.parse_field() {
                        raw_fields.push(raw);
                    } else {
                        self.skip_clause_tail();
                    }
                }
                _ => {
                    self.advance();
                }
            }
        }

        // Everything past the closing paren is table options (ENGINE=...)

        let mut fk_refs: HashMap<&str, &FkClause> = HashMap::new();
        for fk in &fks {
            fk_refs.insert(fk.column.as_str(), fk);
        }

        let mut fields: Vec<Field> = Vec::new();
        for raw in raw_fields {
            // First occurrence of a name wins
            if fields.iter().any(|f| f.name == raw.name) {
                continue;
            }
            let references = fk_refs.get(raw.name.as_str()).map(|fk| FieldRef {
                table: fk.target.clone(),
                field: fk.target_field.clone(),
            });
            fields.push(Field {
                is_primary: pk_columns.contains(&raw.name) || raw.primary_attr,
                is_foreign: references.is_some(),
                name: raw.name,
                typ: raw.typ,
                references,
            });
        }

        let relations = fks
            .into_iter()
            .map(|fk| Relation {
                source: table_name.to_string(),
                target: fk.target,
                source_field: fk.column,
                target_field: fk.target_field,
                is_fk: true,
            })
            .collect();

        Ok((
            Table {
                name: table_name.to_string(),
                fields,
            },
            relations,
        ))
    }

    /// Column definition: name, type keyword, optional `(params)`, trailing
    /// attributes. Returns None when the clause does not look like a column.
    fn parse_field(&mut self) -> Option<RawField> {
        let name = match self.current() {
            Token::Ident(n) => n.clone(),
            _ => return None,
        };
        self.advance();

        let mut typ = match self.current() {
            Token::Ident(t) => t.clone(),
            _ => return None,
        };
        self.advance();

        if self.current() == &Token::LParen {
            self.advance();
            let mut params = String::new();
            let mut depth = 1;
            loop {
                match self.current() {
                    Token::LParen => {
                        depth += 1;
                        params.push('(');
                        self.advance();
                    }
                    Token::RParen => {
                        depth -= 1;
                        self.advance();
                        if depth == 0 {
                            break;
                        }
                        params.push(')');
                    }
                    Token::Ident(s) => {
                        params.push_str(s);
                        self.advance();
                    }
                    Token::Num(n) => {
                        params.push_str(n);
                        self.advance();
                    }
                    Token::Str(s) => {
                        params.push('\'');
                        params.push_str(s);
                        params.push('\'');
                        self.advance();
                    }
                    Token::Comma => {
                        params.push(',');
                        self.advance();
                    }
                    Token::Eof => break,
                    _ => self.advance(),
                }
            }
            typ = format!("{typ}({params})");
        }

        // Trailing attributes up to the end of the clause; only an inline
        // "PRIMARY KEY" changes the field
        let mut primary_attr = false;
        loop {
            match self.current() {
                Token::Comma | Token::RParen | Token::Eof => break,
                Token::Primary => {
                    self.advance();
                    if self.current() == &Token::Key {
                        self.advance();
                        primary_attr = true;
                    }
                }
                Token::LParen => self.skip_parenthesized(),
                _ => self.advance(),
            }
        }

        Some(RawField {
            name,
            typ,
            primary_attr,
        })
    }

    /// FOREIGN KEY (cols) REFERENCES table (cols), columns paired up in
    /// order. A clause without both column lists yields nothing.
    fn parse_foreign_key(&mut self) -> Option<Vec<FkClause>> {
        self.advance(); // FOREIGN
        if self.current() != &Token::Key {
            return None;
        }
        self.advance();

        let columns = self.parse_column_list();

        if self.current() != &Token::References {
            return None;
        }
        self.advance();

        let mut target = match self.current() {
            Token::Ident(n) => n.clone(),
            _ => return None,
        };
        self.advance();

        // db.table form
        if self.current() == &Token::Dot {
            self.advance();
            if let Token::Ident(n) = self.current() {
                target = n.clone();
                self.advance();
            }
        }

        let target_columns = self.parse_column_list();

        Some(
            columns
                .into_iter()
                .zip(target_columns)
                .map(|(column, target_field)| FkClause {
                    column,
                    target: target.clone(),
                    target_field,
                })
                .collect(),
        )
    }

    /// (col1, col2, ...) with delimiters already stripped by the lexer.
    /// Missing opening paren yields an empty list.
    fn parse_column_list(&mut self) -> Vec<String> {
        let mut cols = Vec::new();

        if self.current() != &Token::LParen {
            return cols;
        }
        self.advance();

        loop {
            match self.current() {
                Token::Ident(name) => {
                    cols.push(name.clone());
                    self.advance();
                }
                Token::Comma => {
                    self.advance();
                }
                Token::RParen => {
                    self.advance();
                    break;
                }
                Token::Eof => break,
                _ => {
                    self.advance();
                }
            }
        }

        cols
    }

    /// Skip to the end of the current clause, balancing nested parens.
    fn skip_clause_tail(&mut self) {
        loop {
            match self.current() {
                Token::Comma | Token::RParen | Token::Eof => break,
                Token::LParen => self.skip_parenthesized(),
                _ => self.advance(),
            }
        }
    }

    fn skip_parenthesized(&mut self) {
        if self.current() != &Token::LParen {
            self.advance();
            return;
        }
        self.advance();
        let mut depth = 1;
        while depth > 0 {
            match self.current() {
                Token::LParen => {
                    depth += 1;
                    self.advance();
                }
                Token::RParen => {
                    depth -= 1;
                    self.advance();
                }
                Token::Eof => break,
                _ => {
                    self.advance();
                }
            }
        }
    }
}
