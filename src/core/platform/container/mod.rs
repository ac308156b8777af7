/*
Domain containers

Value types that flow through the prediction pipeline: the validated review text, its
normalized form, the sparse feature vector and the classifier's prediction.
*/

pub mod prediction;
pub mod review;
