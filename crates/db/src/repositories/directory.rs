use async_trait::async_trait;
use dashmap::DashMap;
use mentorsync_core::{
    errors::{SchedulingError, SchedulingResult},
    models::mentor::{MentorProfile, UserContact},
    ports::{MentorDirectory, UserDirectory},
};
use uuid::Uuid;

#[derive(Debug, Default)]
pub struct InMemoryMentorDirectory {
    mentors: DashMap<Uuid, MentorProfile>,
}

impl InMemoryMentorDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, mentor: MentorProfile) {
        self.mentors.insert(mentor.id, mentor);
    }

    fn modify(
        &self,
        mentor_id: Uuid,
        change: impl FnOnce(&mut MentorProfile),
    ) -> SchedulingResult<MentorProfile> {
        let mut entry = self
            .mentors
            .get_mut(&mentor_id)
            .ok_or_else(|| SchedulingError::mentor_not_found(mentor_id))?;
        change(entry.value_mut());
        Ok(entry.value().clone())
    }
}

#[async_trait]
impl MentorDirectory for InMemoryMentorDirectory {
    async fn find_mentor(&self, mentor_id: Uuid) -> SchedulingResult<Option<MentorProfile>> {
        Ok(self.mentors.get(&mentor_id).map(|e| e.value().clone()))
    }

    async fn record_completed_session(&self, mentor_id: Uuid) -> SchedulingResult<MentorProfile> {
        self.modify(mentor_id, |mentor| mentor.total_sessions += 1)
    }

    async fn update_rating(
        &self,
        mentor_id: Uuid,
        rating: f64,
        review_count: u32,
    ) -> SchedulingResult<MentorProfile> {
        self.modify(mentor_id, |mentor| {
            mentor.rating = rating;
            mentor.review_count = review_count;
        })
    }
}

#[derive(Debug, Default)]
pub struct InMemoryUserDirectory {
    users: DashMap<Uuid, UserContact>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, user: UserContact) {
        self.users.insert(user.id, user);
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn find_user(&self, user_id: Uuid) -> SchedulingResult<Option<UserContact>> {
        Ok(self.users.get(&user_id).map(|e| e.value().clone()))
    }
}
