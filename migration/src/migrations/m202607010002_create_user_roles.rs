use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m202607010002_create_user_roles"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Alias::new("user_roles"))
                    .if_not_exists()
                    .col(ColumnDef::new(Alias::new("user_id")).big_integer().not_null().primary_key())
                    .col(ColumnDef::new(Alias::new("role")).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Alias::new("user_roles"), Alias::new("user_id"))
                            .to(Alias::new("users"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Alias::new("user_roles")).to_owned())
            .await
    }
}
