//! Applies parsed DDL statements to a [`SchemaState`].

use crate::ast::{
    AlterColumnChange, AlterTable, AlterTableAction, AlterTableClause, AlterType,
    AlterTypeAction, ColumnConstraintKind, ColumnSpec, CreateTable, CreateType, DropObjects,
    ForeignKeyTarget, LabelPosition, Statement, TableConstraint, TableConstraintKind,
    TableElement,
};
use crate::error::{Result, SchemaError};
use crate::parser::parse;
use crate::schema::naming::{first_unused, inline_constraint_name, table_constraint_name};
use crate::schema::{
    ColumnDef, EnumTypeDef, ForeignKeyRef, IndexDef, IndexKind, SchemaState, TableDef,
};

impl SchemaState {
    /// Parses one DDL statement and applies it.
    ///
    /// Queries (`SELECT`, `WITH`, `INSERT`, `UPDATE`, `DELETE`) are accepted
    /// and ignored. The statement is fully parsed before anything changes, so
    /// a parse error leaves the state untouched. A lookup error inside a
    /// multi-clause `ALTER TABLE` may leave earlier clauses applied; callers
    /// should discard the state after any error.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Parse`] for malformed or unsupported SQL, and a
    /// lookup or conflict error when the statement does not fit the schema.
    pub fn apply(&mut self, sql: &str) -> Result<()> {
        let statement = parse(sql)?;
        self.apply_statement(statement)
    }

    /// Applies an already parsed statement.
    ///
    /// # Errors
    ///
    /// See [`SchemaState::apply`].
    pub fn apply_statement(&mut self, statement: Statement) -> Result<()> {
        match statement {
            Statement::CreateTable(create) => self.create_table(create),
            Statement::CreateType(create) => self.create_type(create),
            Statement::AlterTable(alter) => self.alter_table(alter),
            Statement::AlterType(alter) => self.alter_type(alter),
            Statement::DropTable(drop) => {
                self.drop_tables(&drop);
                Ok(())
            }
            Statement::DropType(drop) => {
                self.drop_types(&drop);
                Ok(())
            }
            Statement::Ignored => Ok(()),
        }
    }

    fn create_table(&mut self, create: CreateTable) -> Result<()> {
        if self.tables.contains_key(&create.name) {
            if create.if_not_exists {
                return Ok(());
            }
            return Err(SchemaError::DuplicateTable(create.name));
        }

        let mut table = TableDef::new(create.name.clone());
        let mut referenced = Vec::new();
        for element in create.elements {
            match element {
                TableElement::Column(column) => add_column(&mut table, column)?,
                TableElement::Constraint(constraint) => {
                    referenced.extend(constraint_columns(&constraint).iter().cloned());
                    add_table_constraint(&mut table, constraint)?;
                }
            }
        }
        // Table constraints may name columns declared after them.
        for column in &referenced {
            require_column(&table, column)?;
        }

        self.tables.insert(create.name, table);
        Ok(())
    }

    fn create_type(&mut self, create: CreateType) -> Result<()> {
        if self.types.contains_key(&create.name) {
            return Err(SchemaError::DuplicateType(create.name));
        }
        self.types.insert(
            create.name.clone(),
            EnumTypeDef::new(create.name, create.labels),
        );
        Ok(())
    }

    fn alter_table(&mut self, alter: AlterTable) -> Result<()> {
        if !self.tables.contains_key(&alter.name) {
            if alter.if_exists {
                return Ok(());
            }
            return Err(SchemaError::UnknownTable(alter.name));
        }

        match alter.action {
            AlterTableAction::RenameTable(new_name) => self.rename_table(&alter.name, new_name),
            AlterTableAction::RenameColumn { from, to } => {
                self.table_mut(&alter.name)?.rename_column(&from, &to)
            }
            AlterTableAction::RenameConstraint { from, to } => {
                let table = self.table_mut(&alter.name)?;
                if from != to && table.has_index(&to) {
                    return Err(SchemaError::DuplicateConstraint {
                        table: alter.name,
                        name: to,
                    });
                }
                match table.indexes.iter_mut().find(|index| index.name == from) {
                    Some(index) => {
                        index.name = to;
                        Ok(())
                    }
                    None => Err(SchemaError::UnknownConstraint {
                        table: alter.name,
                        name: from,
                    }),
                }
            }
            AlterTableAction::Clauses(clauses) => {
                let table = self.table_mut(&alter.name)?;
                for clause in clauses {
                    apply_clause(table, clause)?;
                }
                Ok(())
            }
        }
    }

    /// Re-keys a table, keeping its position among the tables.
    fn rename_table(&mut self, from: &str, to: String) -> Result<()> {
        if from != to && self.tables.contains_key(&to) {
            return Err(SchemaError::DuplicateTable(to));
        }
        let Some((position, _, mut table)) = self.tables.shift_remove_full(from) else {
            return Err(SchemaError::UnknownTable(from.to_string()));
        };
        table.name.clone_from(&to);
        self.tables.shift_insert(position, to, table);
        Ok(())
    }

    fn alter_type(&mut self, alter: AlterType) -> Result<()> {
        match alter.action {
            AlterTypeAction::AddValue {
                label,
                if_not_exists,
                position,
            } => {
                let enum_type = self.enum_type_mut(&alter.name)?;
                if enum_type.position(&label).is_some() {
                    if if_not_exists {
                        return Ok(());
                    }
                    return Err(SchemaError::DuplicateLabel {
                        type_name: alter.name,
                        label,
                    });
                }
                let at = match position {
                    None => enum_type.labels.len(),
                    Some(LabelPosition::Before(existing)) => label_position(enum_type, existing)?,
                    Some(LabelPosition::After(existing)) => {
                        label_position(enum_type, existing)? + 1
                    }
                };
                enum_type.labels.insert(at, label);
                Ok(())
            }
            AlterTypeAction::RenameValue { from, to } => {
                let enum_type = self.enum_type_mut(&alter.name)?;
                if enum_type.position(&to).is_some() {
                    return Err(SchemaError::DuplicateLabel {
                        type_name: alter.name,
                        label: to,
                    });
                }
                let at = label_position(enum_type, from)?;
                enum_type.labels[at] = to;
                Ok(())
            }
            AlterTypeAction::Rename(new_name) => self.rename_type(&alter.name, new_name),
        }
    }

    /// Re-keys an enum type and updates the columns declared with it.
    fn rename_type(&mut self, from: &str, to: String) -> Result<()> {
        if from != to && self.types.contains_key(&to) {
            return Err(SchemaError::DuplicateType(to));
        }
        let Some((position, _, mut enum_type)) = self.types.shift_remove_full(from) else {
            return Err(SchemaError::UnknownType(from.to_string()));
        };
        enum_type.name.clone_from(&to);
        self.types.shift_insert(position, to.clone(), enum_type);

        let array_from = format!("{from}[]");
        for column in self.tables.values_mut().flat_map(|t| t.columns.values_mut()) {
            if column.data_type == from {
                column.data_type.clone_from(&to);
            } else if column.data_type == array_from {
                column.data_type = format!("{to}[]");
            }
        }
        Ok(())
    }

    fn drop_tables(&mut self, drop: &DropObjects) {
        for name in &drop.names {
            self.tables.shift_remove(name);
        }
    }

    fn drop_types(&mut self, drop: &DropObjects) {
        for name in &drop.names {
            self.types.shift_remove(name);
        }
    }
}

fn apply_clause(table: &mut TableDef, clause: AlterTableClause) -> Result<()> {
    match clause {
        AlterTableClause::AddColumn {
            if_not_exists,
            column,
        } => {
            if if_not_exists && table.columns.contains_key(&column.name) {
                return Ok(());
            }
            add_column(table, column)
        }
        AlterTableClause::AddConstraint(constraint) => {
            for column in constraint_columns(&constraint) {
                require_column(table, column)?;
            }
            add_table_constraint(table, constraint)
        }
        AlterTableClause::DropColumn { name, if_exists } => {
            if if_exists && !table.columns.contains_key(&name) {
                return Ok(());
            }
            table.drop_column(&name)
        }
        AlterTableClause::DropConstraint { name, if_exists } => {
            if table.remove_index(&name).is_none() && !if_exists {
                return Err(SchemaError::UnknownConstraint {
                    table: table.name.clone(),
                    name,
                });
            }
            Ok(())
        }
        AlterTableClause::AlterColumn { column, change } => {
            let column = table.column_mut(&column)?;
            match change {
                AlterColumnChange::SetDataType(data_type) => column.data_type = data_type,
                AlterColumnChange::SetDefault(expr) => column.modifiers.default = Some(expr),
                AlterColumnChange::DropDefault => column.modifiers.default = None,
                AlterColumnChange::SetNotNull => column.modifiers.not_null = true,
                AlterColumnChange::DropNotNull => column.modifiers.not_null = false,
            }
            Ok(())
        }
    }
}

/// Adds a column and one index per inline constraint.
fn add_column(table: &mut TableDef, spec: ColumnSpec) -> Result<()> {
    let mut column = ColumnDef::new(spec.name.clone(), spec.data_type);
    let mut indexes: Vec<IndexDef> = Vec::new();

    for constraint in spec.constraints {
        let kind = match constraint.kind {
            ColumnConstraintKind::NotNull => {
                column.modifiers.not_null = true;
                continue;
            }
            ColumnConstraintKind::Null => {
                column.modifiers.not_null = false;
                continue;
            }
            ColumnConstraintKind::Default(expr) => {
                column.modifiers.default = Some(expr);
                continue;
            }
            ColumnConstraintKind::Check(expression) => IndexKind::Check { expression },
            ColumnConstraintKind::Unique => IndexKind::Unique,
            ColumnConstraintKind::PrimaryKey => IndexKind::PrimaryKey,
            ColumnConstraintKind::References(target) => IndexKind::ForeignKey(foreign_key(target)),
        };
        let name = constraint.name.unwrap_or_else(|| {
            first_unused(inline_constraint_name(&table.name, &spec.name, &kind), |name| {
                table.has_index(name) || indexes.iter().any(|index| index.name == name)
            })
        });
        indexes.push(IndexDef::new(name, vec![spec.name.clone()], kind));
    }

    table.add_column(column)?;
    for index in indexes {
        table.add_index(index)?;
    }
    Ok(())
}

fn add_table_constraint(table: &mut TableDef, constraint: TableConstraint) -> Result<()> {
    let (columns, kind) = match constraint.kind {
        TableConstraintKind::PrimaryKey(columns) => (columns, IndexKind::PrimaryKey),
        TableConstraintKind::Unique(columns) => (columns, IndexKind::Unique),
        TableConstraintKind::ForeignKey { columns, target } => {
            (columns, IndexKind::ForeignKey(foreign_key(target)))
        }
        TableConstraintKind::Check(expression) => (Vec::new(), IndexKind::Check { expression }),
    };
    let name = constraint.name.unwrap_or_else(|| {
        first_unused(table_constraint_name(table, &columns, &kind), |name| {
            table.has_index(name)
        })
    });
    table.add_index(IndexDef::new(name, columns, kind))
}

fn constraint_columns(constraint: &TableConstraint) -> &[String] {
    match &constraint.kind {
        TableConstraintKind::PrimaryKey(columns)
        | TableConstraintKind::Unique(columns)
        | TableConstraintKind::ForeignKey { columns, .. } => columns,
        TableConstraintKind::Check(_) => &[],
    }
}

fn require_column(table: &TableDef, column: &str) -> Result<()> {
    if table.columns.contains_key(column) {
        Ok(())
    } else {
        Err(SchemaError::UnknownColumn {
            table: table.name.clone(),
            column: column.to_string(),
        })
    }
}

fn foreign_key(target: ForeignKeyTarget) -> ForeignKeyRef {
    ForeignKeyRef {
        table: target.table,
        columns: target.columns,
        on_delete: target.on_delete,
        on_update: target.on_update,
    }
}

fn label_position(enum_type: &EnumTypeDef, label: String) -> Result<usize> {
    enum_type
        .position(&label)
        .ok_or_else(|| SchemaError::UnknownLabel {
            type_name: enum_type.name.clone(),
            label,
        })
}
