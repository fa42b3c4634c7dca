use diesel::prelude::*;

use crate::domain::history::{HistoryRecord, NewHistoryRecord};
use crate::domain::types::UserId;
use crate::models::history::{
    HistoryRecord as DbHistoryRecord, NewHistoryRecord as DbNewHistoryRecord,
};
use crate::repository::{DieselRepository, HistoryReader, HistoryWriter, RepositoryResult};

impl HistoryReader for DieselRepository {
    fn list_history(&self, user_id: UserId) -> RepositoryResult<Vec<HistoryRecord>> {
        use crate::schema::history;

        let mut conn = self.conn()?;

        let items = history::table
            .filter(history::user_id.eq(user_id.get()))
            .order((history::action_date.asc(), history::id.asc()))
            .load::<DbHistoryRecord>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<HistoryRecord>, _>>()?;

        Ok(items)
    }
}

impl HistoryWriter for DieselRepository {
    fn append_history(&self, record: &NewHistoryRecord) -> RepositoryResult<usize> {
        use crate::schema::history;

        let mut conn = self.conn()?;
        let db_record: DbNewHistoryRecord = record.into();

        let affected = diesel::insert_into(history::table)
            .values(&db_record)
            .execute(&mut conn)?;

        Ok(affected)
    }
}
