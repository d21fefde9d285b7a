use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use uuid::Uuid;

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[allow(dead_code)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub daily_calorie_goal: Option<i32>,
    pub daily_protein_goal: Option<i32>,
    pub daily_carbs_goal: Option<i32>,
    pub daily_fat_goal: Option<i32>,
    pub breakfast_time: Option<String>,
    pub lunch_time: Option<String>,
    pub dinner_time: Option<String>,
    pub snack_time: Option<String>,
    pub dietary_preferences: Option<String>,
    pub allergies: Option<String>,
    pub cuisine_preferences: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUser<'a> {
    pub username: &'a str,
    pub password_hash: &'a str,
    pub name: Option<&'a str>,
}

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = crate::schema::sessions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[allow(dead_code)]
pub struct Session {
    pub id: Uuid,
    pub user_id: Uuid,
    pub token_hash: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::sessions)]
pub struct NewSession<'a> {
    pub user_id: Uuid,
    pub token_hash: &'a str,
    pub expires_at: DateTime<Utc>,
}

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = crate::schema::meals)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[allow(dead_code)]
pub struct Meal {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub calories: i32,
    pub protein: Option<i32>,
    pub carbs: Option<i32>,
    pub fat: Option<i32>,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::meals)]
pub struct NewMeal<'a> {
    pub user_id: Uuid,
    pub name: &'a str,
    pub calories: i32,
    pub protein: Option<i32>,
    pub carbs: Option<i32>,
    pub fat: Option<i32>,
    pub image: Option<&'a str>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::meal_plans)]
pub struct NewMealPlan {
    pub user_id: Uuid,
    pub start_date: NaiveDate,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::meal_plan_items)]
pub struct NewMealPlanItem {
    pub meal_plan_id: Uuid,
    pub day: i32,
    pub meal_id: Uuid,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::pantry_items)]
pub struct NewPantryItem<'a> {
    pub user_id: Uuid,
    pub name: &'a str,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::grocery_items)]
pub struct NewGroceryItem<'a> {
    pub user_id: Uuid,
    pub name: &'a str,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::utensils)]
pub struct NewUtensil<'a> {
    pub user_id: Uuid,
    pub name: &'a str,
    pub category: &'a str,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::chat_turns)]
pub struct NewChatTurn<'a> {
    pub user_id: Uuid,
    pub role: &'a str,
    pub content: &'a str,
}
