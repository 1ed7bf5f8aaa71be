pub mod candidate_sampler;
