#[macro_export]
macro_rules! drop_table {
    ($table:ident, $manager:ident) => {
        $manager
            .drop_table(Table::drop().table($table::Table).to_owned())
            .await?
    };
}

#[macro_export]
macro_rules! unique_index {
    ($name:literal, $table:ident, $manager:ident, $($col:ident),+) => {
        $manager
            .create_index(
                Index::create()
                    .name($name)
                    .table($table::Table)
                    $(.col($table::$col))+
                    .unique()
                    .to_owned(),
            )
            .await?
    };
}

pub(crate) use drop_table;
pub(crate) use unique_index;
