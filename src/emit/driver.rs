//! Benchmark driver appended after the generated tree functions.
//!
//! The driver reads a feature file given as its first argument (a
//! `<numberOfInstances> <numberOfFeatures>` header followed by one
//! `<qid> <name>:<id> <name>:<value> ...` line per instance), scores every instance
//! with all generated functions and prints the average time per instance in
//! nanoseconds.
//!
//! The text is fixed and must stay byte-identical across releases, including the
//! statements that share a line.

use std::io::Write;

use crate::error::Result;

const PROLOGUE: &str = r#"#include <stdio.h>
#include <stdlib.h>
#include <sys/time.h>
#include <time.h>
int main(int argc, char** args) {
  if(argc < 2) {
    return -1;
  }
  char* featureFile = args[1];
  FILE *fp = fopen(featureFile, "r");
  int numberOfInstances;
  int numberOfFeatures;
  fscanf(fp, "%d %d", &numberOfInstances, &numberOfFeatures);  float** features = (float**) malloc(numberOfInstances * sizeof(float*));
  int i = 0;  for(i = 0; i < numberOfInstances; i++) { features[i] =(float*) malloc(numberOfFeatures * sizeof(float)); }
  float fvalue;
  int fIndex = 0, iIndex = 0;
  char text[20];
  int ignore;
  for(iIndex = 0; iIndex < numberOfInstances; iIndex++) {
    fscanf(fp, "%d %[^:]:%d", &ignore, text, &ignore);
    for(fIndex = 0; fIndex < numberOfFeatures; fIndex++) {
      fscanf(fp, "%[^:]:%f", text, &fvalue);
      features[iIndex][fIndex] = fvalue;
    }
  }
  int sum = 0;
  float score = 0;
  struct timeval start, end;
  gettimeofday(&start, NULL);
  for(iIndex = 0; iIndex < numberOfInstances; iIndex++) {
    score = 0;
"#;

const EPILOGUE: &str = r#"    //printf("%f\n", score);
    sum += score;
  }
  gettimeofday(&end, NULL);
  printf("Time per instance (ns): %5.2f\n", (((end.tv_sec * 1000000 + end.tv_usec) - (start.tv_sec * 1000000 + start.tv_usec)) * 1000/((float) numberOfInstances)));
  printf("Ignore this number: %d\n", sum);
  fclose(fp);
  for(i = 0; i < numberOfInstances; i++) { free(features[i]); }
  free(features);  return 0;
}
"#;

/// Write the driver `main` calling `<prefix>0 .. <prefix>{num_trees - 1}`.
pub fn write_driver<W: Write>(prefix: &str, num_trees: usize, out: &mut W) -> Result<()> {
    out.write_all(PROLOGUE.as_bytes())?;
    for i in 0..num_trees {
        writeln!(out, "    score += {}{}(features[iIndex]);", prefix, i)?;
    }
    out.write_all(EPILOGUE.as_bytes())?;
    Ok(())
}
