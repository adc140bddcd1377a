mod comments;
mod health_check;
mod helpers;
mod items;
mod postgres;
mod work_items;
